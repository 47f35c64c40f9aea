//! Sequencing of wallet connection, contract reads and transaction submission.
//!
//! The controller owns the [`SessionState`] and is the only thing that writes to it. It is meant
//! to be shared through an `Rc` with the tasks spawned by the UI: every operation takes `&self`,
//! and the state is never borrowed across an await point, so concurrently running operations
//! interleave safely on the single browser thread.

mod connector;
mod reader;
mod submitter;

use std::{
    cell::{OnceCell, RefCell},
    rc::Rc,
};

use alloy_primitives::Address;

use crate::{
    config::Config,
    contract::TokenContract,
    error::{Error, Tier},
    provider::WalletProvider,
    session::{InputField, SessionState},
    timer::Timer,
};

type Listener = Rc<dyn Fn()>;
type Detector<P> = Box<dyn Fn() -> Option<P>>;

pub struct TokenController<P, T> {
    provider: OnceCell<P>,
    detect: Option<Detector<P>>,
    timer: T,
    config: Config,
    contract: TokenContract,
    session: RefCell<SessionState>,
    listener: RefCell<Option<Listener>>,
}

impl<P: WalletProvider, T: Timer> TokenController<P, T> {
    /// `provider` is `None` when the host has no wallet installed. It is never looked up again.
    pub fn new(provider: Option<P>, timer: T, config: Config) -> Self {
        let controller = Self::build(None, timer, config);
        if let Some(provider) = provider {
            let _ = controller.provider.set(provider);
        }
        controller
    }

    /// Looks the wallet up with `detect` on first use, and again on every operation until one
    /// is found. Wallet extensions may inject themselves after the page has started.
    pub fn detecting(detect: impl Fn() -> Option<P> + 'static, timer: T, config: Config) -> Self {
        Self::build(Some(Box::new(detect)), timer, config)
    }

    fn build(detect: Option<Detector<P>>, timer: T, config: Config) -> Self {
        Self {
            provider: OnceCell::new(),
            detect,
            timer,
            contract: TokenContract::new(config.contract_address),
            config,
            session: RefCell::new(SessionState::default()),
            listener: RefCell::new(None),
        }
    }

    /// Registers the callback run after every change to the session.
    pub fn on_change(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn contract_address(&self) -> Address {
        self.contract.address()
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> SessionState {
        self.session.borrow().clone()
    }

    pub fn set_input(&self, field: InputField, value: String) {
        self.update(|session| session.set_input(field, value));
    }

    /// Connects, then reads the token facts if that worked.
    pub async fn load(&self) {
        if self.connect().await.is_ok() {
            // Failures are already reported by `refresh_facts`.
            let _ = self.refresh_facts().await;
        }
    }

    fn update<R>(&self, change: impl FnOnce(&mut SessionState) -> R) -> R {
        let result = change(&mut self.session.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    /// The wallet-presence check. Once a provider is found it is kept for the session.
    fn provider(&self) -> Result<&P, Error> {
        if let Some(provider) = self.provider.get() {
            return Ok(provider);
        }
        let detected = self
            .detect
            .as_ref()
            .and_then(|detect| detect())
            .ok_or(Error::NoWalletProvider)?;
        log::info!("wallet provider detected");
        Ok(self.provider.get_or_init(|| detected))
    }

    fn account(&self) -> Result<Address, Error> {
        self.session.borrow().account().ok_or(Error::NotConnected)
    }

    /// Environment errors go to the fault banner, everything else only to the log.
    fn report(&self, operation: &str, err: &Error) {
        match err.tier() {
            Tier::Environment => {
                log::warn!("{operation}: {err}");
                self.update(|session| session.raise_fault(err.to_string()));
            }
            Tier::Operation if err.is_user_rejection() => {
                log::info!("{operation}: rejected in wallet: {err}");
            }
            Tier::Operation => log::error!("{operation}: {err}"),
        }
    }
}
