//! Deposit coordinator: the single controlled liquidity-addition path.

use crate::custodian::Custodian;
use crate::error::HookError;
use csmm_domain::currency::Address;
use csmm_domain::pool::PoolKey;
use csmm_ledger::{Settlement, SettlementMode};
use tracing::info;

/// Collects equal amounts of both currencies from a depositor and turns
/// them into custodian claims.
#[derive(Debug, Clone, Copy)]
pub struct DepositCoordinator {
    custodian: Custodian,
}

impl DepositCoordinator {
    #[must_use]
    pub fn new(custodian: Custodian) -> Self {
        Self { custodian }
    }

    /// Deposits `amount_each` of currency0 and currency1.
    ///
    /// Requests, in order: a transfer debit of currency0 then currency1
    /// from `depositor`, then a claim credit of currency0 then currency1 to
    /// the custodian. On success both custodian claim balances have grown
    /// by exactly `amount_each`. The caller owns atomicity: run this inside
    /// a ledger transaction and discard it on error.
    ///
    /// # Errors
    /// [`HookError::ZeroDeposit`] for a zero amount, otherwise the ledger
    /// failure (e.g. insufficient funds) unchanged.
    pub fn add_liquidity(
        &self,
        settlement: &mut dyn Settlement,
        key: &PoolKey,
        depositor: Address,
        amount_each: u128,
    ) -> Result<(), HookError> {
        if amount_each == 0 {
            return Err(HookError::ZeroDeposit);
        }

        let (currency0, currency1) = key.currencies();
        settlement.debit(currency0, depositor, amount_each, SettlementMode::Transfer)?;
        settlement.debit(currency1, depositor, amount_each, SettlementMode::Transfer)?;

        self.custodian
            .issue_claims(settlement, currency0, amount_each)?;
        self.custodian
            .issue_claims(settlement, currency1, amount_each)?;

        info!(
            pool = %key.id(),
            depositor = ?depositor,
            amount_each,
            "Liquidity deposited"
        );
        Ok(())
    }
}
