//! Liquidity custodian.

use csmm_domain::currency::{Address, Currency};
use csmm_domain::pool::PoolKey;
use csmm_ledger::{LedgerError, LedgerView, Settlement, SettlementMode};
use serde::{Deserialize, Serialize};

/// Identity that holds a pool's claim balances.
///
/// The custodian is the only inventory swaps draw from. Depositors and
/// swappers never hold claims themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Custodian {
    address: Address,
}

impl Custodian {
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Issues `amount` claims on `currency` to the custodian.
    ///
    /// # Errors
    /// Propagates ledger failures unchanged.
    pub fn issue_claims(
        &self,
        settlement: &mut dyn Settlement,
        currency: Currency,
        amount: u128,
    ) -> Result<(), LedgerError> {
        settlement.credit(currency, self.address, amount, SettlementMode::Claim)
    }

    /// Redeems `amount` of the custodian's claims on `currency`.
    ///
    /// # Errors
    /// [`LedgerError::InsufficientClaims`] when the custodian holds fewer
    /// claims than requested.
    pub fn redeem_claims(
        &self,
        settlement: &mut dyn Settlement,
        currency: Currency,
        amount: u128,
    ) -> Result<(), LedgerError> {
        settlement.debit(currency, self.address, amount, SettlementMode::Claim)
    }

    /// Current claim balances for both currencies of `key`.
    pub fn claims<V: LedgerView + ?Sized>(&self, view: &V, key: &PoolKey) -> ClaimSnapshot {
        ClaimSnapshot {
            claim0: view.claims_of(self.address, key.currency0),
            claim1: view.claims_of(self.address, key.currency1),
        }
    }
}

/// Custodian claim balances for one pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSnapshot {
    pub claim0: u128,
    pub claim1: u128,
}

impl ClaimSnapshot {
    pub fn new(claim0: u128, claim1: u128) -> Self {
        Self { claim0, claim1 }
    }
}
