use alloy_primitives::{Address, TxHash, U256};
use futures::future::{self, Either};

use super::TokenController;
use crate::{
    contract::TokenContract,
    error::Error,
    provider::{TransactionReceipt, TransactionRequest, WalletProvider},
    session::{OperationKind, Submission, SubmissionState},
    timer::Timer,
    units,
};

/// A submission whose inputs passed validation.
enum Call {
    Transfer { to: Address, amount: U256 },
    Burn { amount: U256 },
    Mint { amount: U256 },
}

fn parse_destination(input: &str) -> Result<Address, Error> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::MissingDestination);
    }
    input
        .parse()
        .map_err(|_| Error::InvalidAddress(input.to_string()))
}

impl<P: WalletProvider, T: Timer> TokenController<P, T> {
    /// Submits whatever the form inputs for `kind` currently hold.
    pub async fn submit_pending(&self, kind: OperationKind) -> Result<TransactionReceipt, Error> {
        let submission = self.session.borrow().input().submission(kind);
        self.submit(submission).await
    }

    /// Validates, sends and waits for confirmation of one mutating call.
    ///
    /// The outcome is recorded as the submission state of its kind; a confirmed burn or mint
    /// also re-reads the total supply. The form inputs are left untouched either way.
    pub async fn submit(&self, submission: Submission) -> Result<TransactionReceipt, Error> {
        let kind = submission.kind();
        if self.session.borrow().submission(kind).is_in_flight() {
            let err = Error::AlreadyInFlight(kind);
            log::warn!("{err}");
            return Err(err);
        }

        let result = self.execute(&submission).await;
        match &result {
            Ok(receipt) => {
                let hash = receipt.transaction_hash;
                self.update(|session| {
                    session.set_submission(kind, SubmissionState::Confirmed(hash))
                });
                if kind.is_privileged() {
                    // A failed re-read is reported by `refresh_supply` and does not undo the
                    // confirmed transaction.
                    let _ = self.refresh_supply().await;
                }
            }
            Err(err) => {
                let reason = err.to_string();
                self.update(|session| session.set_submission(kind, SubmissionState::Failed(reason)));
                self.report(&kind.to_string(), err);
            }
        }
        result
    }

    async fn execute(&self, submission: &Submission) -> Result<TransactionReceipt, Error> {
        let kind = submission.kind();
        let provider = self.provider()?;
        let from = self.account()?;
        let call = self.validate(submission)?;

        // Claimed before the first await, so a second submission of this kind is refused.
        self.update(|session| session.set_submission(kind, SubmissionState::Built));

        let data = match call {
            Call::Transfer { to, amount } => TokenContract::transfer_calldata(to, amount),
            Call::Burn { amount } => {
                if !self.session.borrow().is_owner() {
                    return Err(Error::NotOwner(kind));
                }
                TokenContract::burn_calldata(amount)
            }
            Call::Mint { amount } => {
                let owner = self.contract.owner(provider).await?;
                if owner != from {
                    return Err(Error::NotOwner(kind));
                }
                TokenContract::mint_calldata(owner, amount)
            }
        };

        let request = TransactionRequest {
            from,
            to: self.contract.address(),
            data,
        };
        let hash = provider.send_transaction(request).await?;
        log::info!("{kind} sent: {hash}");
        self.update(|session| session.set_submission(kind, SubmissionState::Sent(hash)));

        let receipt = self.confirmation(provider, hash).await?;
        if !receipt.succeeded() {
            return Err(Error::Reverted(hash));
        }
        log::info!("{kind} confirmed: {hash}");
        Ok(receipt)
    }

    fn validate(&self, submission: &Submission) -> Result<Call, Error> {
        let amount = units::parse_amount(submission.amount(), self.config.decimals)?;
        Ok(match submission {
            Submission::Transfer { destination, .. } => Call::Transfer {
                to: parse_destination(destination)?,
                amount,
            },
            Submission::Burn { .. } => Call::Burn { amount },
            Submission::Mint { .. } => Call::Mint { amount },
        })
    }

    async fn confirmation(&self, provider: &P, hash: TxHash) -> Result<TransactionReceipt, Error> {
        let confirmed = provider.wait_for_confirmation(hash, self.config.confirmations);
        let Some(timeout) = self.config.confirmation_timeout else {
            return confirmed.await;
        };
        match future::select(confirmed, self.timer.sleep(timeout)).await {
            Either::Left((receipt, _)) => receipt,
            Either::Right(((), _)) => Err(Error::ConfirmationTimeout { hash, timeout }),
        }
    }
}
