//! Everything the display layer can observe about the current session.

use std::fmt;

use alloy_primitives::{Address, TxHash, U256};

use crate::units;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Transfer,
    Burn,
    Mint,
}

impl OperationKind {
    /// Burn and mint are reserved for the token owner.
    pub fn is_privileged(self) -> bool {
        !matches!(self, OperationKind::Transfer)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Transfer => write!(f, "transfer"),
            OperationKind::Burn => write!(f, "burn"),
            OperationKind::Mint => write!(f, "mint"),
        }
    }
}

/// Contract facts that only change when re-fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFacts {
    pub name: String,
    pub symbol: String,
    pub owner: Address,
}

/// Total supply in base units, displayed in token units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supply {
    base_units: U256,
    decimals: u8,
}

impl Supply {
    pub fn new(base_units: U256, decimals: u8) -> Self {
        Self {
            base_units,
            decimals,
        }
    }

    pub fn base_units(&self) -> U256 {
        self.base_units
    }
}

impl fmt::Display for Supply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&units::format_amount(self.base_units, self.decimals))
    }
}

/// User-facing error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Destination,
    TransferAmount,
    BurnAmount,
    MintAmount,
}

/// Raw text of the form inputs. Nothing here is ever cleared automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingInput {
    pub destination: String,
    pub transfer_amount: String,
    pub burn_amount: String,
    pub mint_amount: String,
}

impl PendingInput {
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Destination => &self.destination,
            InputField::TransferAmount => &self.transfer_amount,
            InputField::BurnAmount => &self.burn_amount,
            InputField::MintAmount => &self.mint_amount,
        }
    }

    pub fn set(&mut self, field: InputField, value: String) {
        match field {
            InputField::Destination => self.destination = value,
            InputField::TransferAmount => self.transfer_amount = value,
            InputField::BurnAmount => self.burn_amount = value,
            InputField::MintAmount => self.mint_amount = value,
        }
    }

    /// The submission the current inputs describe for `kind`.
    pub fn submission(&self, kind: OperationKind) -> Submission {
        match kind {
            OperationKind::Transfer => Submission::Transfer {
                destination: self.destination.clone(),
                amount: self.transfer_amount.clone(),
            },
            OperationKind::Burn => Submission::Burn {
                amount: self.burn_amount.clone(),
            },
            OperationKind::Mint => Submission::Mint {
                amount: self.mint_amount.clone(),
            },
        }
    }
}

/// Unvalidated parameters of a mutating call, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Transfer { destination: String, amount: String },
    Burn { amount: String },
    Mint { amount: String },
}

impl Submission {
    pub fn kind(&self) -> OperationKind {
        match self {
            Submission::Transfer { .. } => OperationKind::Transfer,
            Submission::Burn { .. } => OperationKind::Burn,
            Submission::Mint { .. } => OperationKind::Mint,
        }
    }

    pub fn amount(&self) -> &str {
        match self {
            Submission::Transfer { amount, .. }
            | Submission::Burn { amount }
            | Submission::Mint { amount } => amount,
        }
    }
}

/// Progress of the latest submission of one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Built,
    Sent(TxHash),
    Confirmed(TxHash),
    Failed(String),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Built | SubmissionState::Sent(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submissions {
    transfer: SubmissionState,
    burn: SubmissionState,
    mint: SubmissionState,
}

impl Submissions {
    pub fn get(&self, kind: OperationKind) -> &SubmissionState {
        match kind {
            OperationKind::Transfer => &self.transfer,
            OperationKind::Burn => &self.burn,
            OperationKind::Mint => &self.mint,
        }
    }

    fn get_mut(&mut self, kind: OperationKind) -> &mut SubmissionState {
        match kind {
            OperationKind::Transfer => &mut self.transfer,
            OperationKind::Burn => &mut self.burn,
            OperationKind::Mint => &mut self.mint,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    account: Option<Address>,
    facts: Option<TokenFacts>,
    supply: Option<Supply>,
    fault: Option<Fault>,
    input: PendingInput,
    submissions: Submissions,
}

impl SessionState {
    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn facts(&self) -> Option<&TokenFacts> {
        self.facts.as_ref()
    }

    pub fn supply(&self) -> Option<Supply> {
        self.supply
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn input(&self) -> &PendingInput {
        &self.input
    }

    pub fn submission(&self, kind: OperationKind) -> &SubmissionState {
        self.submissions.get(kind)
    }

    /// Whether the connected account is the token owner. Addresses are compared as bytes, so
    /// the hex casing either side reported them in does not matter.
    pub fn is_owner(&self) -> bool {
        match (self.account, &self.facts) {
            (Some(account), Some(facts)) => account == facts.owner,
            _ => false,
        }
    }

    pub(crate) fn set_account(&mut self, account: Address) {
        self.account = Some(account);
    }

    pub(crate) fn commit_facts(&mut self, facts: TokenFacts, supply: Supply) {
        self.facts = Some(facts);
        self.supply = Some(supply);
    }

    pub(crate) fn commit_supply(&mut self, supply: Supply) {
        self.supply = Some(supply);
    }

    pub(crate) fn raise_fault(&mut self, message: String) {
        self.fault = Some(Fault { message });
    }

    pub(crate) fn clear_fault(&mut self) {
        self.fault = None;
    }

    pub(crate) fn set_input(&mut self, field: InputField, value: String) {
        self.input.set(field, value);
    }

    pub(crate) fn set_submission(&mut self, kind: OperationKind, state: SubmissionState) {
        *self.submissions.get_mut(kind) = state;
    }
}
