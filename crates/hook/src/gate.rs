//! Guarded liquidity gate for the generic liquidity path.

use crate::hook::{HookDecision, Rejection};
use csmm_domain::currency::Address;
use csmm_domain::pool::PoolKey;
use csmm_domain::value_objects::ModifyLiquidityParams;
use tracing::{debug, warn};

/// Closes the generic addition path so every deposit goes through the
/// coordinator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityGate;

impl LiquidityGate {
    /// Always rejects, whatever the caller or amount (zero included).
    pub fn before_add_liquidity(
        &self,
        sender: Address,
        key: &PoolKey,
        params: &ModifyLiquidityParams,
    ) -> HookDecision {
        debug!(
            pool = %key.id(),
            sender = ?sender,
            amount = params.change.amount(),
            "Generic liquidity addition rejected"
        );
        HookDecision::Reject(Rejection::AddLiquidityThroughHook)
    }

    /// Lets generic removal through untouched.
    ///
    /// Custodian claims are not adjusted here, so a removal on this path is
    /// not reflected in claim accounting.
    pub fn before_remove_liquidity(
        &self,
        sender: Address,
        key: &PoolKey,
        params: &ModifyLiquidityParams,
    ) -> HookDecision {
        warn!(
            pool = %key.id(),
            sender = ?sender,
            amount = params.change.amount(),
            "Generic liquidity removal passed through without claim adjustment"
        );
        HookDecision::Accept
    }
}
