//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use csmm_domain::prelude::*;
//! ```

// Currencies
pub use crate::currency::{Address, Currency};

// Errors
pub use crate::error::DomainError;

// Math
pub use crate::math::{checked_add, checked_neg, magnitude, to_signed};

// Permissions
pub use crate::permissions::HookPermissions;

// Pools
pub use crate::pool::{PoolId, PoolKey};

// Value objects
pub use crate::value_objects::{
    BalanceDelta, BeforeSwapDelta, LiquidityChange, ModifyLiquidityParams, SwapParams,
};
