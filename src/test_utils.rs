//! In-memory stand-ins for the wallet and the clock.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use alloy_primitives::{address, keccak256, Address, Bytes, TxHash, U256, U64};
use alloy_sol_types::{SolInterface, SolValue};
use async_trait::async_trait;

use crate::{
    contract::IZimpToken::IZimpTokenCalls,
    error::Error,
    provider::{TransactionReceipt, TransactionRequest, WalletProvider},
    timer::Timer,
};

pub const OWNER: Address = address!("0xa0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0");
pub const HOLDER: Address = address!("0xc0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0");
pub const RECIPIENT: Address = address!("0xb0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0");

pub fn tokens(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
}

/// Resolves after being polled once, waking itself so joined futures get a turn.
#[derive(Default)]
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Receipt is available on the first poll after a yield.
    Mined,
    /// Mined, but the call reverted.
    Reverted,
    /// Never included.
    Never,
}

/// A single-token chain with a wallet attached.
pub struct MockProvider {
    pub accounts: Vec<Address>,
    pub reject_authorization: bool,
    pub name: String,
    pub symbol: String,
    pub owner: RefCell<Address>,
    pub total_supply: RefCell<U256>,
    pub balances: RefCell<HashMap<Address, U256>>,
    /// Entry point name whose reads fail.
    pub failing_read: RefCell<Option<&'static str>>,
    pub confirmation: Cell<Confirmation>,
    /// Names of every read call, in order.
    pub reads: RefCell<Vec<&'static str>>,
    pub sent: RefCell<Vec<TransactionRequest>>,
    receipts: RefCell<HashMap<TxHash, TransactionReceipt>>,
}

impl MockProvider {
    /// Token with `supply` whole tokens, all held by [`OWNER`]; the wallet holds `account`.
    pub fn new(account: Address, supply: u64) -> Self {
        let mut balances = HashMap::new();
        balances.insert(OWNER, tokens(supply));
        Self {
            accounts: vec![account],
            reject_authorization: false,
            name: "Zimp".to_string(),
            symbol: "ZMP".to_string(),
            owner: RefCell::new(OWNER),
            total_supply: RefCell::new(tokens(supply)),
            balances: RefCell::new(balances),
            failing_read: RefCell::new(None),
            confirmation: Cell::new(Confirmation::Mined),
            reads: RefCell::new(Vec::new()),
            sent: RefCell::new(Vec::new()),
            receipts: RefCell::new(HashMap::new()),
        }
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances
            .borrow()
            .get(&account)
            .copied()
            .unwrap_or_default()
    }

    fn read(&self, name: &'static str, output: Vec<u8>) -> Result<Bytes, Error> {
        self.reads.borrow_mut().push(name);
        if *self.failing_read.borrow() == Some(name) {
            return Err(Error::Rpc {
                method: "eth_call",
                code: -32000,
                message: format!("{name} unavailable"),
            });
        }
        Ok(output.into())
    }

    fn debit(&self, from: Address, amount: U256) -> bool {
        let mut balances = self.balances.borrow_mut();
        let balance = balances.entry(from).or_default();
        if *balance < amount {
            return false;
        }
        *balance -= amount;
        true
    }

    /// Applies a state-changing call the way the token contract would; `false` means revert.
    fn execute(&self, from: Address, data: &[u8]) -> Result<bool, Error> {
        let owner = *self.owner.borrow();
        Ok(match IZimpTokenCalls::abi_decode(data)? {
            IZimpTokenCalls::transfer(call) => {
                let ok = self.debit(from, call.amount);
                if ok {
                    *self.balances.borrow_mut().entry(call.to).or_default() += call.amount;
                }
                ok
            }
            IZimpTokenCalls::burn(call) => {
                let ok = from == owner && self.debit(from, call.amount);
                if ok {
                    *self.total_supply.borrow_mut() -= call.amount;
                }
                ok
            }
            IZimpTokenCalls::mint(call) => {
                let ok = from == owner;
                if ok {
                    *self.balances.borrow_mut().entry(call.to).or_default() += call.amount;
                    *self.total_supply.borrow_mut() += call.amount;
                }
                ok
            }
            _ => false,
        })
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        YieldNow::default().await;
        if self.reject_authorization {
            return Err(Error::Rpc {
                method: "eth_requestAccounts",
                code: 4001,
                message: "User rejected the request.".to_string(),
            });
        }
        Ok(self.accounts.clone())
    }

    async fn call(&self, _to: Address, data: Bytes) -> Result<Bytes, Error> {
        YieldNow::default().await;
        match IZimpTokenCalls::abi_decode(&data)? {
            IZimpTokenCalls::name(_) => self.read("name", (self.name.clone(),).abi_encode_params()),
            IZimpTokenCalls::symbol(_) => {
                self.read("symbol", (self.symbol.clone(),).abi_encode_params())
            }
            IZimpTokenCalls::owner(_) => {
                let owner = *self.owner.borrow();
                self.read("owner", (owner,).abi_encode_params())
            }
            IZimpTokenCalls::totalSupply(_) => {
                let supply = *self.total_supply.borrow();
                self.read("totalSupply", (supply,).abi_encode_params())
            }
            _ => Err(Error::Rpc {
                method: "eth_call",
                code: 3,
                message: "execution reverted".to_string(),
            }),
        }
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, Error> {
        let nonce = self.sent.borrow().len() as u64;
        let hash = keccak256([request.data.as_ref(), &nonce.to_be_bytes()[..]].concat());

        let mined = match self.confirmation.get() {
            Confirmation::Mined => self.execute(request.from, &request.data)?,
            Confirmation::Reverted => false,
            Confirmation::Never => {
                self.sent.borrow_mut().push(request);
                return Ok(hash);
            }
        };
        self.receipts.borrow_mut().insert(
            hash,
            TransactionReceipt {
                transaction_hash: hash,
                block_number: Some(U64::from(nonce + 1)),
                status: Some(if mined { U64::from(1) } else { U64::ZERO }),
            },
        );
        self.sent.borrow_mut().push(request);
        Ok(hash)
    }

    async fn wait_for_confirmation(
        &self,
        hash: TxHash,
        _confirmations: u64,
    ) -> Result<TransactionReceipt, Error> {
        YieldNow::default().await;
        let receipt = self.receipts.borrow().get(&hash).cloned();
        match receipt {
            Some(receipt) => Ok(receipt),
            None => futures::future::pending().await,
        }
    }
}

/// Timer that either fires straight away or never.
pub struct MockTimer {
    pub fires: bool,
}

impl MockTimer {
    pub fn never() -> Self {
        Self { fires: false }
    }

    pub fn immediate() -> Self {
        Self { fires: true }
    }
}

#[async_trait(?Send)]
impl Timer for MockTimer {
    async fn sleep(&self, _duration: Duration) {
        if !self.fires {
            futures::future::pending::<()>().await;
        }
    }
}
