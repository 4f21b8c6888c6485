//! Constant-sum market maker core.
//!
//! This crate provides the swap-settlement and liquidity-custody logic:
//! - The liquidity custodian holding the pool's claim balances
//! - The deposit coordinator, the single allowed way to add liquidity
//! - The swap router pricing every swap at a fixed 1:1 rate
//! - The guarded liquidity gate closing the generic addition path
//! - The [`Hook`] strategy interface the surrounding dispatcher drives
//!
//! Every operation issues its debits and credits against a
//! [`csmm_ledger::Settlement`]; wrapping a call in a ledger transaction
//! makes it all-or-nothing.

/// Prelude module for convenient imports.
pub mod prelude;

/// Deposit coordinator.
pub mod coordinator;
/// The constant-sum hook.
pub mod csmm;
/// Liquidity custodian.
pub mod custodian;
/// Hook error type.
pub mod error;
/// Guarded liquidity gate.
pub mod gate;
/// Hook strategy interface.
pub mod hook;
/// Swap router.
pub mod router;

pub use csmm::ConstantSumHook;
pub use error::HookError;
pub use hook::{Hook, HookCall, HookDecision, LiquidityCoordinator, Rejection};
