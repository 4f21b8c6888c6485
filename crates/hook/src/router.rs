//! Swap router: fixed 1:1 pricing against the custodian's claims.

use crate::custodian::Custodian;
use crate::error::HookError;
use csmm_domain::math;
use csmm_domain::pool::PoolKey;
use csmm_domain::value_objects::{BeforeSwapDelta, SwapParams};
use csmm_ledger::Settlement;
use tracing::debug;

/// Computes the 1:1 swap delta and moves custodian claims to match.
#[derive(Debug, Clone, Copy)]
pub struct SwapRouter {
    custodian: Custodian,
}

impl SwapRouter {
    #[must_use]
    pub fn new(custodian: Custodian) -> Self {
        Self { custodian }
    }

    /// Delta reported for `params`: `(-amount_specified, amount_specified)`.
    ///
    /// # Errors
    /// [`csmm_domain::DomainError::Overflow`] when `amount_specified` is
    /// `i128::MIN`.
    pub fn quote(params: &SwapParams) -> Result<BeforeSwapDelta, HookError> {
        let specified = math::checked_neg(params.amount_specified)?;
        Ok(BeforeSwapDelta::new(specified, params.amount_specified))
    }

    /// Routes one swap.
    ///
    /// zeroForOne issues `|amount_specified|` claims on both currencies to
    /// the custodian; oneForZero redeems the same on both. Currency0 is
    /// always requested before currency1. The overflow guard runs before
    /// any ledger request, and a zero amount routes zero-sized requests.
    ///
    /// # Errors
    /// Arithmetic overflow, or the ledger failure unchanged (a oneForZero
    /// swap larger than the custodian's claims fails here).
    pub fn route(
        &self,
        settlement: &mut dyn Settlement,
        key: &PoolKey,
        params: &SwapParams,
    ) -> Result<BeforeSwapDelta, HookError> {
        let magnitude = params.magnitude()?;
        let delta = Self::quote(params)?;

        let (currency0, currency1) = key.currencies();
        if params.zero_for_one {
            self.custodian
                .issue_claims(settlement, currency0, magnitude)?;
            self.custodian
                .issue_claims(settlement, currency1, magnitude)?;
        } else {
            self.custodian
                .redeem_claims(settlement, currency0, magnitude)?;
            self.custodian
                .redeem_claims(settlement, currency1, magnitude)?;
        }

        debug!(
            pool = %key.id(),
            zero_for_one = params.zero_for_one,
            amount_specified = params.amount_specified,
            delta = %delta,
            "Swap routed"
        );
        Ok(delta)
    }
}
