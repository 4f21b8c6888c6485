use csmm_domain::currency::{Address, Currency};
use thiserror::Error;

/// Errors surfaced by the settlement ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient funds: {owner:#x} holds {available} of {currency}, {requested} requested")]
    InsufficientFunds {
        currency: Currency,
        owner: Address,
        requested: u128,
        available: u128,
    },

    #[error("insufficient claims: {owner:#x} holds {available} claims on {currency}, {requested} requested")]
    InsufficientClaims {
        currency: Currency,
        owner: Address,
        requested: u128,
        available: u128,
    },

    #[error("insufficient reserves of {currency}: {available} available, {requested} requested")]
    InsufficientReserves {
        currency: Currency,
        requested: u128,
        available: u128,
    },

    #[error("balance overflow for {currency}")]
    Overflow { currency: Currency },
}
