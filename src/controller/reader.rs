use super::TokenController;
use crate::{
    error::Error,
    provider::WalletProvider,
    session::{Supply, TokenFacts},
    timer::Timer,
};

impl<P: WalletProvider, T: Timer> TokenController<P, T> {
    /// Reads name, symbol, owner and total supply concurrently and commits them together.
    /// Nothing is committed unless all four reads succeed.
    pub async fn refresh_facts(&self) -> Result<(), Error> {
        match self.read_facts().await {
            Ok((facts, supply)) => {
                log::info!(
                    "{} ({}) supply {supply}, owner {}",
                    facts.name,
                    facts.symbol,
                    facts.owner
                );
                self.update(|session| session.commit_facts(facts, supply));
                Ok(())
            }
            Err(err) => {
                self.report("read token facts", &err);
                Err(err)
            }
        }
    }

    /// Re-reads only the total supply.
    pub async fn refresh_supply(&self) -> Result<Supply, Error> {
        match self.read_supply().await {
            Ok(supply) => {
                log::info!("supply now {supply}");
                self.update(|session| session.commit_supply(supply));
                Ok(supply)
            }
            Err(err) => {
                self.report("read total supply", &err);
                Err(err)
            }
        }
    }

    async fn read_facts(&self) -> Result<(TokenFacts, Supply), Error> {
        let provider = self.provider()?;
        self.account()?;

        let contract = &self.contract;
        let (name, symbol, owner, total_supply) = futures::try_join!(
            contract.name(provider),
            contract.symbol(provider),
            contract.owner(provider),
            contract.total_supply(provider)
        )?;
        let facts = TokenFacts {
            name,
            symbol,
            owner,
        };
        Ok((facts, Supply::new(total_supply, self.config.decimals)))
    }

    async fn read_supply(&self) -> Result<Supply, Error> {
        let provider = self.provider()?;
        let total_supply = self.contract.total_supply(provider).await?;
        Ok(Supply::new(total_supply, self.config.decimals))
    }
}
