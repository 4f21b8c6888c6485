//! Pool manager: registration, dispatch and settlement for hook pools.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::{EventData, EventLog, PoolEvent};
use crate::registry::{PoolCounters, PoolRecord, PoolRegistry};
use csmm_domain::currency::{Address, Currency};
use csmm_domain::math;
use csmm_domain::pool::{PoolId, PoolKey};
use csmm_domain::value_objects::{
    BalanceDelta, BeforeSwapDelta, LiquidityChange, ModifyLiquidityParams, SwapParams,
};
use csmm_hook::custodian::{ClaimSnapshot, Custodian};
use csmm_hook::{Hook, HookCall, HookDecision, LiquidityCoordinator};
use csmm_ledger::{InMemoryLedger, LedgerTransaction, LedgerView, Settlement, SettlementMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

/// Result of a settled swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// `(specified, unspecified)` as reported by the hook.
    pub hook_delta: BeforeSwapDelta,
    /// The same delta keyed by currency, from the swapper's side.
    pub balance_delta: BalanceDelta,
}

/// Dispatcher for pools served by one hook.
///
/// Every public operation locks its pool, then the ledger, and runs inside a
/// single ledger transaction. Nothing is committed, counted or logged
/// unless the whole operation succeeds.
pub struct PoolManager<H: Hook> {
    hook: Arc<H>,
    ledger: Arc<Mutex<InMemoryLedger>>,
    registry: PoolRegistry,
    events: EventLog,
    config: EngineConfig,
}

impl<H: Hook> PoolManager<H> {
    /// Creates a manager over `ledger` serving pools of `hook`.
    pub fn new(hook: H, ledger: InMemoryLedger, config: EngineConfig) -> Self {
        Self {
            hook: Arc::new(hook),
            ledger: Arc::new(Mutex::new(ledger)),
            registry: PoolRegistry::new(),
            events: EventLog::new(config.event_capacity),
            config,
        }
    }

    /// Registers a pool served by this manager's hook.
    ///
    /// # Errors
    /// Invalid key, a key naming another hook, invalid hook permissions, or
    /// a pool that already exists.
    pub async fn initialize(&self, key: PoolKey) -> Result<PoolId, EngineError> {
        key.validate()?;
        if key.hooks != self.hook.address() {
            return Err(EngineError::HookAddressMismatch {
                expected: key.hooks,
                actual: self.hook.address(),
            });
        }
        self.hook.permissions().validate()?;

        let id = self.registry.register(key).await?;
        let claims = self.claims(&key).await;
        self.events
            .push(PoolEvent::new(
                id,
                EventData::Initialized {
                    fee: key.fee,
                    tick_spacing: key.tick_spacing,
                },
                claims,
            ))
            .await;

        info!(
            pool = %id,
            currency0 = %key.currency0,
            currency1 = %key.currency1,
            fee = key.fee,
            tick_spacing = key.tick_spacing,
            "Pool initialized"
        );
        Ok(id)
    }

    /// Generic liquidity path, gated by the hook.
    ///
    /// Additions reach the hook's before-add callback. Removals reach the
    /// before-remove callback and then the generic curve, which holds no
    /// liquidity: removing zero is a no-op, anything more fails.
    ///
    /// The tick range is checked only after the hook has accepted the call.
    ///
    /// # Errors
    /// [`EngineError::Rejected`] when the hook refuses, an invalid tick
    /// range, or [`EngineError::InsufficientLiquidity`] for a non-zero
    /// removal.
    pub async fn modify_liquidity(
        &self,
        key: &PoolKey,
        owner: Address,
        params: ModifyLiquidityParams,
    ) -> Result<BalanceDelta, EngineError> {
        let id = key.id();
        let record = self.pool(key).await?;
        let mut pool = record.lock().await;

        let result = self
            .transact(key, |tx| self.run_modify(tx, key, owner, &params))
            .await;

        match result {
            Ok((delta, claims)) => {
                if let LiquidityChange::Remove(liquidity) = params.change {
                    pool.counters.removals = pool.counters.removals.saturating_add(1);
                    self.events
                        .push(PoolEvent::new(
                            id,
                            EventData::LiquidityRemoved { owner, liquidity },
                            claims,
                        ))
                        .await;
                    info!(pool = %id, liquidity, "Generic liquidity removed");
                }
                Ok(delta)
            }
            Err(err) => Err(Self::failed(&pool, "modify_liquidity", err)),
        }
    }

    /// Swaps through the hook.
    ///
    /// The hook settles its side against the custodian's claims and reports
    /// a delta. The manager then settles the swapper's side in transfer
    /// mode, all debits before any credit.
    ///
    /// # Errors
    /// Arithmetic overflow for `i128::MIN`, hook and ledger failures
    /// (insufficient funds, claims or reserves), or
    /// [`EngineError::InsufficientLiquidity`] when the hook leaves part of
    /// the specified amount unswapped.
    pub async fn swap(
        &self,
        key: &PoolKey,
        swapper: Address,
        params: SwapParams,
    ) -> Result<SwapOutcome, EngineError> {
        params.magnitude()?;
        let id = key.id();
        let record = self.pool(key).await?;
        let mut pool = record.lock().await;

        let result = self
            .transact(key, |tx| self.run_swap(tx, key, swapper, &params))
            .await;

        match result {
            Ok((outcome, claims)) => {
                pool.counters.swaps = pool.counters.swaps.saturating_add(1);
                self.events
                    .push(PoolEvent::new(
                        id,
                        EventData::Swap {
                            swapper,
                            params,
                            delta: outcome.balance_delta,
                        },
                        claims,
                    ))
                    .await;
                info!(
                    pool = %id,
                    zero_for_one = params.zero_for_one,
                    amount_specified = params.amount_specified,
                    delta = %outcome.balance_delta,
                    "Swap settled"
                );
                Ok(outcome)
            }
            Err(err) => Err(Self::failed(&pool, "swap", err)),
        }
    }

    /// Counters of pool `id`.
    ///
    /// # Errors
    /// [`EngineError::PoolNotInitialized`] for an unknown pool.
    pub async fn counters(&self, id: PoolId) -> Result<PoolCounters, EngineError> {
        Ok(self.registry.get(id).await?.lock().await.counters)
    }

    /// Custodian claims on both currencies of `key`.
    pub async fn claims(&self, key: &PoolKey) -> ClaimSnapshot {
        let ledger = self.ledger.lock().await;
        self.custodian().claims(&*ledger, key)
    }

    pub async fn balance_of(&self, owner: Address, currency: Currency) -> u128 {
        self.ledger.lock().await.balance_of(owner, currency)
    }

    pub async fn reserves_of(&self, currency: Currency) -> u128 {
        self.ledger.lock().await.reserves_of(currency)
    }

    /// Funds `owner` directly on the ledger.
    ///
    /// # Errors
    /// Ledger overflow.
    pub async fn mint(
        &self,
        owner: Address,
        currency: Currency,
        amount: u128,
    ) -> Result<(), EngineError> {
        self.ledger.lock().await.mint(owner, currency, amount)?;
        Ok(())
    }

    /// Retained lifecycle events, oldest first.
    pub async fn events(&self) -> Vec<PoolEvent> {
        self.events.snapshot().await
    }

    /// Retained lifecycle events of one pool, oldest first.
    pub async fn pool_events(&self, id: PoolId) -> Vec<PoolEvent> {
        self.events.for_pool(id).await
    }

    fn custodian(&self) -> Custodian {
        Custodian::new(self.hook.address())
    }

    async fn pool(&self, key: &PoolKey) -> Result<Arc<Mutex<PoolRecord>>, EngineError> {
        key.validate()?;
        self.registry.get(key.id()).await
    }

    /// Runs `op` in one ledger transaction and commits only on success.
    ///
    /// Callers must already hold the pool lock.
    async fn transact<T, F>(&self, key: &PoolKey, op: F) -> Result<(T, ClaimSnapshot), EngineError>
    where
        F: FnOnce(&mut LedgerTransaction<'_>) -> Result<T, EngineError>,
    {
        let mut ledger = self.ledger.lock().await;
        let mut tx = ledger.begin();
        let value = op(&mut tx)?;
        let journal = tx.commit();

        if self.config.log_settlements {
            for entry in &journal {
                info!(
                    pool = %key.id(),
                    kind = ?entry.kind,
                    currency = %entry.currency,
                    account = ?entry.account,
                    amount = entry.amount,
                    mode = %entry.mode,
                    "Settlement committed"
                );
            }
        }

        let claims = self.custodian().claims(&*ledger, key);
        Ok((value, claims))
    }

    fn run_modify(
        &self,
        settlement: &mut dyn Settlement,
        key: &PoolKey,
        owner: Address,
        params: &ModifyLiquidityParams,
    ) -> Result<BalanceDelta, EngineError> {
        let permissions = self.hook.permissions();
        let call = match params.change {
            LiquidityChange::Add(_) if permissions.before_add_liquidity => {
                Some(HookCall::BeforeAddLiquidity {
                    sender: owner,
                    key,
                    params,
                })
            }
            LiquidityChange::Remove(_) if permissions.before_remove_liquidity => {
                Some(HookCall::BeforeRemoveLiquidity {
                    sender: owner,
                    key,
                    params,
                })
            }
            _ => None,
        };

        if let Some(call) = call {
            match self.hook.dispatch(settlement, call)? {
                HookDecision::Accept => {}
                HookDecision::Reject(rejection) => return Err(EngineError::Rejected(rejection)),
                HookDecision::Override(_) => return Err(EngineError::InvalidHookResponse),
            }
        }
        params.validate()?;

        // Only the coordinator adds liquidity, and it books custodian claims
        // rather than curve positions, so the generic curve is always empty.
        match params.change {
            LiquidityChange::Add(_) => Err(EngineError::GenericLiquidityUnsupported(key.id())),
            LiquidityChange::Remove(0) => Ok(BalanceDelta::ZERO),
            LiquidityChange::Remove(_) => Err(EngineError::InsufficientLiquidity(key.id())),
        }
    }

    fn run_swap(
        &self,
        settlement: &mut dyn Settlement,
        key: &PoolKey,
        swapper: Address,
        params: &SwapParams,
    ) -> Result<SwapOutcome, EngineError> {
        let permissions = self.hook.permissions();
        let mut hook_delta = BeforeSwapDelta::ZERO;

        if permissions.before_swap {
            let call = HookCall::BeforeSwap {
                sender: swapper,
                key,
                params,
            };
            match self.hook.dispatch(settlement, call)? {
                HookDecision::Accept => {}
                HookDecision::Reject(rejection) => return Err(EngineError::Rejected(rejection)),
                HookDecision::Override(delta) => {
                    if !permissions.before_swap_return_delta {
                        return Err(EngineError::InvalidHookResponse);
                    }
                    hook_delta = delta;
                }
            }
        }

        let residual = math::checked_add(
            params.amount_specified,
            hook_delta.specified,
            "swap residual",
        )?;
        if residual != 0 {
            return Err(EngineError::InsufficientLiquidity(key.id()));
        }

        let balance_delta = hook_delta.to_balance_delta(params);
        Self::settle_swapper(settlement, key, swapper, balance_delta)?;

        Ok(SwapOutcome {
            hook_delta,
            balance_delta,
        })
    }

    /// Settles the swapper's legs: negative legs are debited first, then
    /// positive legs are credited.
    fn settle_swapper(
        settlement: &mut dyn Settlement,
        key: &PoolKey,
        swapper: Address,
        delta: BalanceDelta,
    ) -> Result<(), EngineError> {
        let legs = [(key.currency0, delta.amount0), (key.currency1, delta.amount1)];

        for (currency, amount) in legs {
            if amount < 0 {
                settlement.debit(
                    currency,
                    swapper,
                    amount.unsigned_abs(),
                    SettlementMode::Transfer,
                )?;
            }
        }
        for (currency, amount) in legs {
            if amount > 0 {
                settlement.credit(
                    currency,
                    swapper,
                    amount.unsigned_abs(),
                    SettlementMode::Transfer,
                )?;
            }
        }
        Ok(())
    }

    fn failed(pool: &MutexGuard<'_, PoolRecord>, operation: &str, err: EngineError) -> EngineError {
        warn!(
            pool = %pool.key.id(),
            operation,
            error = %err,
            "Operation aborted, no state changed"
        );
        err
    }
}

impl<H: LiquidityCoordinator> PoolManager<H> {
    /// Deposits `amount_each` of both currencies through the hook's
    /// coordinator.
    ///
    /// # Errors
    /// Zero amount, a pool not served by the hook, or insufficient
    /// depositor funds. Any failure leaves balances and counters unchanged.
    pub async fn add_liquidity(
        &self,
        key: &PoolKey,
        depositor: Address,
        amount_each: u128,
    ) -> Result<(), EngineError> {
        let id = key.id();
        let record = self.pool(key).await?;
        let mut pool = record.lock().await;

        let result = self
            .transact(key, |tx| {
                self.hook
                    .add_liquidity(tx, key, depositor, amount_each)
                    .map_err(EngineError::from)
            })
            .await;

        match result {
            Ok(((), claims)) => {
                pool.counters.deposits = pool.counters.deposits.saturating_add(1);
                self.events
                    .push(PoolEvent::new(
                        id,
                        EventData::Deposit {
                            depositor,
                            amount_each,
                        },
                        claims,
                    ))
                    .await;
                Ok(())
            }
            Err(err) => Err(Self::failed(&pool, "add_liquidity", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csmm_domain::DomainError;
    use csmm_hook::{ConstantSumHook, HookError, Rejection};
    use csmm_ledger::LedgerError;

    fn hook_address() -> Address {
        Address::from_low_u64_be(0x0a88)
    }

    fn key() -> PoolKey {
        PoolKey::new(
            Currency::from_low_u64(1),
            Currency::from_low_u64(2),
            3000,
            60,
            hook_address(),
        )
        .unwrap()
    }

    fn depositor() -> Address {
        Address::from_low_u64_be(0xd0)
    }

    fn swapper() -> Address {
        Address::from_low_u64_be(0x5a)
    }

    async fn manager() -> PoolManager<ConstantSumHook> {
        let manager = PoolManager::new(
            ConstantSumHook::new(hook_address()),
            InMemoryLedger::new(),
            EngineConfig::default(),
        );
        manager.initialize(key()).await.unwrap();
        for owner in [depositor(), swapper()] {
            manager.mint(owner, key().currency0, 10_000).await.unwrap();
            manager.mint(owner, key().currency1, 10_000).await.unwrap();
        }
        manager
    }

    #[tokio::test]
    async fn test_initialize_checks_hook_address() {
        let manager = PoolManager::new(
            ConstantSumHook::new(hook_address()),
            InMemoryLedger::new(),
            EngineConfig::default(),
        );
        let mut foreign = key();
        foreign.hooks = Address::from_low_u64_be(0xdead);

        assert!(matches!(
            manager.initialize(foreign).await,
            Err(EngineError::HookAddressMismatch { .. })
        ));
        let id = manager.initialize(key()).await.unwrap();
        assert_eq!(
            manager.initialize(key()).await,
            Err(EngineError::PoolAlreadyInitialized(id))
        );
    }

    #[tokio::test]
    async fn test_example_scenario() {
        let manager = manager().await;
        let id = key().id();

        manager
            .add_liquidity(&key(), depositor(), 1000)
            .await
            .unwrap();
        assert_eq!(manager.claims(&key()).await, ClaimSnapshot::new(1000, 1000));

        let outcome = manager
            .swap(&key(), swapper(), SwapParams::new(true, 100))
            .await
            .unwrap();
        assert_eq!(outcome.hook_delta, BeforeSwapDelta::new(-100, 100));
        assert_eq!(outcome.balance_delta, BalanceDelta::new(-100, 100));
        assert_eq!(manager.claims(&key()).await, ClaimSnapshot::new(1100, 1100));

        let outcome = manager
            .swap(&key(), swapper(), SwapParams::new(false, -50))
            .await
            .unwrap();
        assert_eq!(outcome.hook_delta, BeforeSwapDelta::new(50, -50));
        assert_eq!(manager.claims(&key()).await, ClaimSnapshot::new(1050, 1050));

        // Swapper paid 100 of currency0 and 50 of currency1, and got 100 of
        // currency1 and 50 of currency0 back.
        assert_eq!(manager.balance_of(swapper(), key().currency0).await, 9_950);
        assert_eq!(manager.balance_of(swapper(), key().currency1).await, 10_050);
        assert_eq!(manager.reserves_of(key().currency0).await, 1_050);
        assert_eq!(manager.reserves_of(key().currency1).await, 950);

        let counters = manager.counters(id).await.unwrap();
        assert_eq!(
            counters,
            PoolCounters {
                swaps: 2,
                deposits: 1,
                removals: 0
            }
        );
    }

    #[tokio::test]
    async fn test_generic_add_rejected_for_any_amount() {
        let manager = manager().await;
        // Valid, empty, inverted and out-of-bounds ranges all hit the gate.
        let ranges = [
            (-887_272, 887_272),
            (-60, 60),
            (10, 10),
            (120, 60),
            (-1_000_000, 0),
            (0, i32::MAX),
        ];
        for amount in [0, 5, 1_000_000] {
            for (tick_lower, tick_upper) in ranges {
                let mut params = ModifyLiquidityParams::full_range(LiquidityChange::Add(amount));
                params.tick_lower = tick_lower;
                params.tick_upper = tick_upper;
                assert_eq!(
                    manager.modify_liquidity(&key(), depositor(), params).await,
                    Err(EngineError::Rejected(Rejection::AddLiquidityThroughHook))
                );
            }
        }
        assert_eq!(
            manager.counters(key().id()).await.unwrap(),
            PoolCounters::default()
        );
    }

    #[tokio::test]
    async fn test_add_with_empty_range_hits_gate() {
        let manager = manager().await;
        let mut params = ModifyLiquidityParams::full_range(LiquidityChange::Add(5));
        params.tick_lower = 10;
        params.tick_upper = 10;
        assert_eq!(
            manager.modify_liquidity(&key(), depositor(), params).await,
            Err(EngineError::Rejected(Rejection::AddLiquidityThroughHook))
        );
    }

    #[tokio::test]
    async fn test_remove_with_invalid_range_fails_after_hook() {
        let manager = manager().await;
        let mut params = ModifyLiquidityParams::full_range(LiquidityChange::Remove(0));
        params.tick_lower = 60;
        params.tick_upper = -60;
        assert_eq!(
            manager.modify_liquidity(&key(), depositor(), params).await,
            Err(EngineError::Domain(DomainError::InvalidTickRange {
                lower: 60,
                upper: -60
            }))
        );
        assert_eq!(manager.counters(key().id()).await.unwrap().removals, 0);
    }

    #[tokio::test]
    async fn test_generic_remove_passes_through() {
        let manager = manager().await;
        let zero = ModifyLiquidityParams::full_range(LiquidityChange::Remove(0));
        assert_eq!(
            manager.modify_liquidity(&key(), depositor(), zero).await,
            Ok(BalanceDelta::ZERO)
        );

        let some = ModifyLiquidityParams::full_range(LiquidityChange::Remove(5));
        assert!(matches!(
            manager.modify_liquidity(&key(), depositor(), some).await,
            Err(EngineError::InsufficientLiquidity(_))
        ));
        assert_eq!(manager.counters(key().id()).await.unwrap().removals, 1);
    }

    #[tokio::test]
    async fn test_min_amount_rejected() {
        let manager = manager().await;
        manager
            .add_liquidity(&key(), depositor(), 1000)
            .await
            .unwrap();

        let err = manager
            .swap(&key(), swapper(), SwapParams::new(true, i128::MIN))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::Domain(DomainError::Overflow { .. })
        ));
        assert_eq!(manager.claims(&key()).await, ClaimSnapshot::new(1000, 1000));
        assert_eq!(manager.counters(key().id()).await.unwrap().swaps, 0);
    }

    #[tokio::test]
    async fn test_zero_swap_is_noop() {
        let manager = manager().await;
        let outcome = manager
            .swap(&key(), swapper(), SwapParams::new(false, 0))
            .await
            .unwrap();
        assert_eq!(outcome.balance_delta, BalanceDelta::ZERO);
        assert_eq!(manager.balance_of(swapper(), key().currency0).await, 10_000);
        assert_eq!(manager.counters(key().id()).await.unwrap().swaps, 1);
    }

    #[tokio::test]
    async fn test_failed_deposit_changes_nothing() {
        let manager = manager().await;
        let poor = Address::from_low_u64_be(0x0b);
        manager.mint(poor, key().currency0, 500).await.unwrap();
        manager.mint(poor, key().currency1, 100).await.unwrap();

        let err = manager.add_liquidity(&key(), poor, 500).await.unwrap_err();

        assert!(matches!(
            err,
            EngineError::Hook(HookError::Ledger(LedgerError::InsufficientFunds { .. }))
        ));
        assert_eq!(manager.balance_of(poor, key().currency0).await, 500);
        assert_eq!(manager.reserves_of(key().currency0).await, 0);
        assert_eq!(manager.claims(&key()).await, ClaimSnapshot::default());
        assert_eq!(manager.counters(key().id()).await.unwrap().deposits, 0);
        assert_eq!(manager.pool_events(key().id()).await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_swap_rolls_back_hook_side() {
        let manager = manager().await;
        manager
            .add_liquidity(&key(), depositor(), 1000)
            .await
            .unwrap();
        let broke = Address::from_low_u64_be(0x0c);

        // The hook redeems claims first; the swapper then cannot pay.
        let err = manager
            .swap(&key(), broke, SwapParams::new(false, 10))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EngineError::Ledger(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(manager.claims(&key()).await, ClaimSnapshot::new(1000, 1000));
        assert_eq!(manager.counters(key().id()).await.unwrap().swaps, 0);
    }

    #[tokio::test]
    async fn test_swap_beyond_reserves_fails() {
        let manager = manager().await;
        manager.add_liquidity(&key(), depositor(), 10).await.unwrap();

        let err = manager
            .swap(&key(), swapper(), SwapParams::new(true, 11))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Ledger(LedgerError::InsufficientReserves { .. })
        ));
        assert_eq!(manager.claims(&key()).await, ClaimSnapshot::new(10, 10));
    }

    #[tokio::test]
    async fn test_unknown_pool() {
        let manager = manager().await;
        let mut other = key();
        other.fee = 500;
        assert!(matches!(
            manager.swap(&other, swapper(), SwapParams::new(true, 1)).await,
            Err(EngineError::PoolNotInitialized(_))
        ));
    }

    #[tokio::test]
    async fn test_events_record_committed_operations() {
        let manager = manager().await;
        manager
            .add_liquidity(&key(), depositor(), 100)
            .await
            .unwrap();
        manager
            .swap(&key(), swapper(), SwapParams::new(true, 10))
            .await
            .unwrap();

        let events = manager.events().await;
        let types: Vec<_> = events.iter().map(|e| e.event_type).collect();
        assert_eq!(
            types,
            vec![
                crate::events::PoolEventType::Initialized,
                crate::events::PoolEventType::Deposit,
                crate::events::PoolEventType::Swap,
            ]
        );
        assert_eq!(events[2].claims, ClaimSnapshot::new(110, 110));
    }
}
