//! The wallet seam. Everything that reaches the chain goes through [`WalletProvider`], so the
//! controller can run against the injected browser wallet or an in-memory ledger.

mod injected;

use alloy_primitives::{Address, Bytes, TxHash, U64};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use injected::InjectedProvider;

/// Parameters of `eth_sendTransaction`. Gas and fees are left to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` when reverted. Missing on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status != Some(U64::ZERO)
    }
}

#[async_trait(?Send)]
pub trait WalletProvider {
    /// Asks the user to authorize the page; returns the authorized accounts, primary first.
    async fn request_accounts(&self) -> Result<Vec<Address>, Error>;

    /// Read-only call against the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, Error>;

    /// Has the wallet sign and broadcast a transaction, returning its hash once accepted.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<TxHash, Error>;

    /// Resolves once the transaction is included and buried under `confirmations - 1` blocks.
    async fn wait_for_confirmation(
        &self,
        hash: TxHash,
        confirmations: u64,
    ) -> Result<TransactionReceipt, Error>;
}
