use crate::error::LedgerError;
use csmm_domain::currency::{Address, Currency};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects what a debit or credit moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementMode {
    /// Moves custody of the underlying asset.
    Transfer,
    /// Issues (credit) or redeems (debit) an internal claim balance.
    Claim,
}

impl SettlementMode {
    pub fn is_claim(&self) -> bool {
        matches!(self, Self::Claim)
    }
}

impl fmt::Display for SettlementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => write!(f, "transfer"),
            Self::Claim => write!(f, "claim"),
        }
    }
}

/// Debit/credit primitives against a shared ledger.
///
/// A zero amount is a valid no-op in both directions.
pub trait Settlement {
    /// Takes `amount` of `currency` from `payer`.
    ///
    /// # Errors
    /// [`LedgerError::InsufficientFunds`] or [`LedgerError::InsufficientClaims`]
    /// when the payer is short, [`LedgerError::Overflow`] if the receiving
    /// side cannot hold the amount.
    fn debit(
        &mut self,
        currency: Currency,
        payer: Address,
        amount: u128,
        mode: SettlementMode,
    ) -> Result<(), LedgerError>;

    /// Gives `amount` of `currency` to `payee`.
    ///
    /// # Errors
    /// [`LedgerError::InsufficientReserves`] when a transfer exceeds what the
    /// pool custodies, [`LedgerError::Overflow`] if the payee balance would
    /// overflow.
    fn credit(
        &mut self,
        currency: Currency,
        payee: Address,
        amount: u128,
        mode: SettlementMode,
    ) -> Result<(), LedgerError>;
}

/// Read side of a ledger.
pub trait LedgerView {
    /// Real asset balance held by `owner`.
    fn balance_of(&self, owner: Address, currency: Currency) -> u128;
    /// Claim balance held by `owner`.
    fn claims_of(&self, owner: Address, currency: Currency) -> u128;
    /// Underlying asset custodied by the ledger itself.
    fn reserves_of(&self, currency: Currency) -> u128;
}
