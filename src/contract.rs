//! Typed access to the token contract's entry points.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use crate::{error::Error, provider::WalletProvider};

sol! {
    interface IZimpToken {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function owner() external view returns (address);
        function totalSupply() external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function burn(uint256 amount) external;
        function mint(address to, uint256 amount) external;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenContract {
    address: Address,
}

impl TokenContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    async fn read<P, C>(&self, provider: &P, call: C) -> Result<C::Return, Error>
    where
        P: WalletProvider + ?Sized,
        C: SolCall,
    {
        let output = provider
            .call(self.address, Bytes::from(call.abi_encode()))
            .await?;
        Ok(C::abi_decode_returns(&output)?)
    }

    pub async fn name<P: WalletProvider + ?Sized>(&self, provider: &P) -> Result<String, Error> {
        self.read(provider, IZimpToken::nameCall {}).await
    }

    pub async fn symbol<P: WalletProvider + ?Sized>(&self, provider: &P) -> Result<String, Error> {
        self.read(provider, IZimpToken::symbolCall {}).await
    }

    pub async fn owner<P: WalletProvider + ?Sized>(&self, provider: &P) -> Result<Address, Error> {
        self.read(provider, IZimpToken::ownerCall {}).await
    }

    pub async fn total_supply<P: WalletProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> Result<U256, Error> {
        self.read(provider, IZimpToken::totalSupplyCall {}).await
    }

    pub fn transfer_calldata(to: Address, amount: U256) -> Bytes {
        IZimpToken::transferCall { to, amount }.abi_encode().into()
    }

    pub fn burn_calldata(amount: U256) -> Bytes {
        IZimpToken::burnCall { amount }.abi_encode().into()
    }

    pub fn mint_calldata(to: Address, amount: U256) -> Bytes {
        IZimpToken::mintCall { to, amount }.abi_encode().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn calldata_starts_with_selector() {
        let to = address!("0xb0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0");
        let data = TokenContract::transfer_calldata(to, U256::from(10u64));
        assert_eq!(&data[..4], &IZimpToken::transferCall::SELECTOR[..]);
        assert_eq!(data.len(), 4 + 32 * 2);

        let data = TokenContract::burn_calldata(U256::from(10u64));
        assert_eq!(&data[..4], &IZimpToken::burnCall::SELECTOR[..]);
        assert_eq!(data.len(), 4 + 32);
    }

    #[test]
    fn mint_calldata_names_recipient() {
        let to = address!("0xa0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0");
        let data = TokenContract::mint_calldata(to, U256::from(7u64));
        let decoded = IZimpToken::mintCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.to, to);
        assert_eq!(decoded.amount, U256::from(7u64));
    }
}
