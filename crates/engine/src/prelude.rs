//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use csmm_engine::prelude::*;
//! ```

// Config
pub use crate::config::EngineConfig;

// Errors
pub use crate::error::EngineError;

// Events
pub use crate::events::{EventData, EventLog, PoolEvent, PoolEventType};

// Manager
pub use crate::manager::{PoolManager, SwapOutcome};

// Registry
pub use crate::registry::{PoolCounters, PoolRecord, PoolRegistry};
