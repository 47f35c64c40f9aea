use alloy_primitives::Address;

use super::TokenController;
use crate::{error::Error, provider::WalletProvider, timer::Timer};

impl<P: WalletProvider, T: Timer> TokenController<P, T> {
    /// Requests account authorization and records the first account the wallet returns.
    ///
    /// A missing wallet raises the fault banner; a refused authorization is only logged and
    /// leaves the previous account in place. Calling this again re-runs the request.
    pub async fn connect(&self) -> Result<Address, Error> {
        let result = self.request_account().await;
        if let Err(err) = &result {
            self.report("connect", err);
        }
        result
    }

    async fn request_account(&self) -> Result<Address, Error> {
        let provider = self.provider()?;
        self.update(|session| session.clear_fault());

        let accounts = provider.request_accounts().await?;
        let account = accounts.first().copied().ok_or(Error::NoAccounts)?;
        log::info!("Account connected: {account}");
        self.update(|session| session.set_account(account));
        Ok(account)
    }
}
