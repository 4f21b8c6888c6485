//! Pool dispatcher for hook-driven pools.
//!
//! This crate provides the machinery around the hook core:
//! - Pool registration and a per-pool registry
//! - Per-pool exclusive locks around every public operation
//! - A ledger transaction boundary per operation (all-or-nothing)
//! - Settlement of the swapper's side of a reported swap delta
//! - Diagnostic counters and a bounded lifecycle event log
//! - Engine configuration

/// Prelude module for convenient imports.
pub mod prelude;

/// Engine configuration.
pub mod config;
/// Engine error type.
pub mod error;
/// Lifecycle events.
pub mod events;
/// The pool manager.
pub mod manager;
/// Pool registry and counters.
pub mod registry;

pub use config::EngineConfig;
pub use error::EngineError;
pub use manager::{PoolManager, SwapOutcome};
