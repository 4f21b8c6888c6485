//! Lifecycle events for pool history.

use chrono::{DateTime, Utc};
use csmm_domain::currency::Address;
use csmm_domain::pool::PoolId;
use csmm_domain::value_objects::{BalanceDelta, SwapParams};
use csmm_hook::custodian::ClaimSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Type of lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEventType {
    /// Pool was registered.
    Initialized,
    /// Liquidity was deposited through the coordinator.
    Deposit,
    /// A swap settled.
    Swap,
    /// A generic removal passed through.
    LiquidityRemoved,
}

/// Event-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventData {
    Initialized {
        fee: u32,
        tick_spacing: i32,
    },
    Deposit {
        depositor: Address,
        amount_each: u128,
    },
    Swap {
        swapper: Address,
        params: SwapParams,
        /// Swapper-side delta.
        delta: BalanceDelta,
    },
    LiquidityRemoved {
        owner: Address,
        liquidity: u128,
    },
}

impl EventData {
    pub fn event_type(&self) -> PoolEventType {
        match self {
            Self::Initialized { .. } => PoolEventType::Initialized,
            Self::Deposit { .. } => PoolEventType::Deposit,
            Self::Swap { .. } => PoolEventType::Swap,
            Self::LiquidityRemoved { .. } => PoolEventType::LiquidityRemoved,
        }
    }
}

/// A committed pool operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolEvent {
    /// Event ID.
    pub id: Uuid,
    /// Pool the operation ran against.
    pub pool_id: PoolId,
    /// Event type.
    pub event_type: PoolEventType,
    /// Timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event-specific data.
    pub data: EventData,
    /// Custodian claims right after the commit.
    pub claims: ClaimSnapshot,
}

impl PoolEvent {
    /// Creates a new event stamped with the current time.
    pub fn new(pool_id: PoolId, data: EventData, claims: ClaimSnapshot) -> Self {
        Self {
            id: Uuid::new_v4(),
            pool_id,
            event_type: data.event_type(),
            timestamp: Utc::now(),
            data,
            claims,
        }
    }
}

/// Bounded, append-only event history. The oldest event goes first.
pub struct EventLog {
    events: RwLock<VecDeque<PoolEvent>>,
    capacity: usize,
}

impl EventLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    /// Appends an event, evicting the oldest when full.
    pub async fn push(&self, event: PoolEvent) {
        if self.capacity == 0 {
            return;
        }
        let mut events = self.events.write().await;
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// All retained events, oldest first.
    pub async fn snapshot(&self) -> Vec<PoolEvent> {
        self.events.read().await.iter().cloned().collect()
    }

    /// Retained events of one pool, oldest first.
    pub async fn for_pool(&self, pool_id: PoolId) -> Vec<PoolEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.pool_id == pool_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}
