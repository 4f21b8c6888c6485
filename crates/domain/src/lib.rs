//! Domain types for the constant-sum market maker.
//!
//! This crate holds the value types shared by every layer:
//! - Currencies and account addresses
//! - Pool keys and their derived identities
//! - Swap and liquidity parameters
//! - Balance deltas reported back to callers
//! - Hook permission declarations
//! - Checked signed/unsigned conversions

/// Prelude module for convenient imports.
pub mod prelude;

/// Currency and address types.
pub mod currency;
/// Domain error type.
pub mod error;
/// Checked integer helpers.
pub mod math;
/// Hook permission declarations.
pub mod permissions;
/// Pool keys and identities.
pub mod pool;
/// Swap and liquidity value objects.
pub mod value_objects;

pub use error::DomainError;
