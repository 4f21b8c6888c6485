//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use csmm_hook::prelude::*;
//! ```

// Components
pub use crate::coordinator::DepositCoordinator;
pub use crate::custodian::{ClaimSnapshot, Custodian};
pub use crate::gate::LiquidityGate;
pub use crate::router::SwapRouter;

// Hook
pub use crate::csmm::ConstantSumHook;
pub use crate::error::HookError;
pub use crate::hook::{Hook, HookCall, HookDecision, LiquidityCoordinator, Rejection};
