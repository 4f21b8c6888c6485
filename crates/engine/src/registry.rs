//! Pool registry and per-pool diagnostic counters.

use crate::error::EngineError;
use chrono::{DateTime, Utc};
use csmm_domain::pool::{PoolId, PoolKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Per-pool operation counters.
///
/// Each counter grows by exactly one per committed operation of its kind.
/// Failed operations leave them untouched. Nothing depends on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCounters {
    /// Committed swaps.
    pub swaps: u64,
    /// Committed coordinator deposits.
    pub deposits: u64,
    /// Committed generic removals.
    pub removals: u64,
}

/// Registry entry for one pool.
#[derive(Debug, Clone)]
pub struct PoolRecord {
    /// Key the pool was registered with.
    pub key: PoolKey,
    /// Diagnostic counters.
    pub counters: PoolCounters,
    /// When the pool was registered.
    pub initialized_at: DateTime<Utc>,
}

impl PoolRecord {
    /// Creates a record with zeroed counters.
    #[must_use]
    pub fn new(key: PoolKey) -> Self {
        Self {
            key,
            counters: PoolCounters::default(),
            initialized_at: Utc::now(),
        }
    }
}

/// Registered pools, each behind its own exclusive lock.
pub struct PoolRegistry {
    pools: RwLock<HashMap<PoolId, Arc<Mutex<PoolRecord>>>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `key`.
    ///
    /// # Errors
    /// [`EngineError::PoolAlreadyInitialized`] if the pool id is taken.
    pub async fn register(&self, key: PoolKey) -> Result<PoolId, EngineError> {
        let id = key.id();
        let mut pools = self.pools.write().await;
        if pools.contains_key(&id) {
            return Err(EngineError::PoolAlreadyInitialized(id));
        }
        pools.insert(id, Arc::new(Mutex::new(PoolRecord::new(key))));
        debug!(pool = %id, "Pool registered");
        Ok(id)
    }

    /// Returns the lock guarding pool `id`.
    ///
    /// # Errors
    /// [`EngineError::PoolNotInitialized`] for an unknown pool.
    pub async fn get(&self, id: PoolId) -> Result<Arc<Mutex<PoolRecord>>, EngineError> {
        self.pools
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(EngineError::PoolNotInitialized(id))
    }

    /// Number of registered pools.
    pub async fn len(&self) -> usize {
        self.pools.read().await.len()
    }

    /// Whether no pool is registered.
    pub async fn is_empty(&self) -> bool {
        self.pools.read().await.is_empty()
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
