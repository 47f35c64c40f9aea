use std::time::Duration;

use alloy_primitives::{address, Address};

use crate::{abi::Artifact, error::Error};

/// Deployed Zimp token.
pub const CONTRACT_ADDRESS: Address = address!("0xDA4B3B7E3Ee3dE4cB02bDD62469c4C53e46E669c");

/// The token uses the usual 18-decimal convention.
pub const TOKEN_DECIMALS: u8 = 18;

const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(10 * 60);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Fixed for the lifetime of the page. Values can be overridden when the crate is built, through
/// `ZIMP_CONTRACT_ADDRESS`, `ZIMP_CONFIRMATIONS` and `ZIMP_CONFIRMATION_TIMEOUT_SECS` (`0`
/// disables the deadline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub contract_address: Address,
    pub decimals: u8,
    /// Blocks, counting the one that includes the transaction.
    pub confirmations: u64,
    pub confirmation_timeout: Option<Duration>,
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contract_address: CONTRACT_ADDRESS,
            decimals: TOKEN_DECIMALS,
            confirmations: 1,
            confirmation_timeout: Some(DEFAULT_CONFIRMATION_TIMEOUT),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Config {
    /// Builds the configuration and validates the bundled contract ABI.
    pub fn load() -> Result<Self, Error> {
        let config = Self::with_overrides(Overrides {
            address: option_env!("ZIMP_CONTRACT_ADDRESS"),
            confirmations: option_env!("ZIMP_CONFIRMATIONS"),
            timeout_secs: option_env!("ZIMP_CONFIRMATION_TIMEOUT_SECS"),
        })?;
        Artifact::bundled()?.ensure_token_surface()?;
        log::info!(
            "token contract {} ({} confirmations, timeout {:?})",
            config.contract_address,
            config.confirmations,
            config.confirmation_timeout
        );
        Ok(config)
    }

    fn with_overrides(overrides: Overrides<'_>) -> Result<Self, Error> {
        let Overrides {
            address,
            confirmations,
            timeout_secs,
        } = overrides;
        let mut config = Self::default();
        if let Some(address) = address {
            config.contract_address = address
                .parse()
                .map_err(|_| Error::InvalidAddress(address.to_string()))?;
        }
        if let Some(depth) = confirmations {
            config.confirmations = match depth.trim().parse::<u64>() {
                Ok(depth) if depth > 0 => depth,
                _ => {
                    return Err(Error::InvalidConfig(format!(
                        "`{depth}` is not a positive number of confirmations"
                    )))
                }
            };
        }
        if let Some(secs) = timeout_secs {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("`{secs}` is not a number of seconds"))
            })?;
            config.confirmation_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[derive(Debug, Default)]
struct Overrides<'a> {
    address: Option<&'a str>,
    confirmations: Option<&'a str>,
    timeout_secs: Option<&'a str>,
}
