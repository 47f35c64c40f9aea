use alloy_primitives::TxHash;
use std::time::Duration;
use thiserror::Error;

use crate::session::OperationKind;

/// Where a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// The host environment cannot run the app at all. Shown as a persistent banner.
    Environment,
    /// A single connect/read/submit attempt failed. Logged, and recorded on the
    /// submission status where there is one.
    Operation,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Install a MetaMask wallet to get our token.")]
    NoWalletProvider,

    #[error("wallet returned no accounts")]
    NoAccounts,

    #[error("wallet is not connected")]
    NotConnected,

    #[error("wallet request `{method}` failed ({code}): {message}")]
    Rpc {
        method: &'static str,
        code: i64,
        message: String,
    },

    #[error("malformed response to `{method}`: {reason}")]
    MalformedResponse {
        method: &'static str,
        reason: String,
    },

    #[error("destination address is required")]
    MissingDestination,

    #[error("invalid address `{0}`")]
    InvalidAddress(String),

    #[error("invalid amount `{input}`: {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("only the token owner can {0}")]
    NotOwner(OperationKind),

    #[error("a {0} is already in flight")]
    AlreadyInFlight(OperationKind),

    #[error("transaction {0} reverted")]
    Reverted(TxHash),

    #[error("transaction {hash} was not confirmed within {timeout:?}")]
    ConfirmationTimeout { hash: TxHash, timeout: Duration },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("contract ABI has no entry point `{0}`")]
    MissingAbiEntry(&'static str),

    #[error(transparent)]
    Abi(#[from] alloy_sol_types::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn tier(&self) -> Tier {
        match self {
            Error::NoWalletProvider => Tier::Environment,
            _ => Tier::Operation,
        }
    }

    /// EIP-1193 code 4001: the user dismissed the wallet prompt.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Error::Rpc { code: 4001, .. })
    }
}
