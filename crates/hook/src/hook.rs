//! Hook strategy interface.
//!
//! The surrounding dispatcher builds a [`HookCall`] for each lifecycle point
//! a hook declared in its permissions and acts on the [`HookDecision`] it
//! gets back. Calls are synchronous and run inside the dispatcher's
//! transaction.

use crate::error::HookError;
use csmm_domain::currency::Address;
use csmm_domain::permissions::HookPermissions;
use csmm_domain::pool::PoolKey;
use csmm_domain::value_objects::{BeforeSwapDelta, ModifyLiquidityParams, SwapParams};
use csmm_ledger::Settlement;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A lifecycle callback request.
#[derive(Debug, Clone, Copy)]
pub enum HookCall<'a> {
    BeforeAddLiquidity {
        sender: Address,
        key: &'a PoolKey,
        params: &'a ModifyLiquidityParams,
    },
    BeforeRemoveLiquidity {
        sender: Address,
        key: &'a PoolKey,
        params: &'a ModifyLiquidityParams,
    },
    BeforeSwap {
        sender: Address,
        key: &'a PoolKey,
        params: &'a SwapParams,
    },
}

/// Why a hook refused an operation. Rejections are final, not retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("liquidity must be added through the hook's deposit coordinator")]
    AddLiquidityThroughHook,
}

/// What the dispatcher should do after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookDecision {
    /// Proceed with the generic operation.
    Accept,
    /// Abort the operation.
    Reject(Rejection),
    /// Proceed, with the hook having settled this swap delta itself.
    Override(BeforeSwapDelta),
}

/// Lifecycle hook driven by the pool dispatcher.
///
/// Callbacks default to [`HookDecision::Accept`].
pub trait Hook: Send + Sync {
    /// Identity of the hook; pools name it in [`PoolKey::hooks`].
    fn address(&self) -> Address;

    /// Callbacks the dispatcher must invoke.
    fn permissions(&self) -> HookPermissions;

    fn before_add_liquidity(
        &self,
        _sender: Address,
        _key: &PoolKey,
        _params: &ModifyLiquidityParams,
    ) -> Result<HookDecision, HookError> {
        Ok(HookDecision::Accept)
    }

    fn before_remove_liquidity(
        &self,
        _sender: Address,
        _key: &PoolKey,
        _params: &ModifyLiquidityParams,
    ) -> Result<HookDecision, HookError> {
        Ok(HookDecision::Accept)
    }

    fn before_swap(
        &self,
        _settlement: &mut dyn Settlement,
        _sender: Address,
        _key: &PoolKey,
        _params: &SwapParams,
    ) -> Result<HookDecision, HookError> {
        Ok(HookDecision::Accept)
    }

    /// Routes a [`HookCall`] to the matching callback.
    ///
    /// # Errors
    /// Whatever the callback returns.
    fn dispatch(
        &self,
        settlement: &mut dyn Settlement,
        call: HookCall<'_>,
    ) -> Result<HookDecision, HookError> {
        match call {
            HookCall::BeforeAddLiquidity {
                sender,
                key,
                params,
            } => self.before_add_liquidity(sender, key, params),
            HookCall::BeforeRemoveLiquidity {
                sender,
                key,
                params,
            } => self.before_remove_liquidity(sender, key, params),
            HookCall::BeforeSwap {
                sender,
                key,
                params,
            } => self.before_swap(settlement, sender, key, params),
        }
    }
}

/// A hook that owns the controlled liquidity-addition path.
pub trait LiquidityCoordinator: Hook {
    /// Deposits `amount_each` of both pool currencies from `depositor`.
    ///
    /// # Errors
    /// See [`crate::coordinator::DepositCoordinator::add_liquidity`].
    fn add_liquidity(
        &self,
        settlement: &mut dyn Settlement,
        key: &PoolKey,
        depositor: Address,
        amount_each: u128,
    ) -> Result<(), HookError>;
}
