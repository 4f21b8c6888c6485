use csmm_domain::currency::{Address, Currency};
use csmm_domain::pool::PoolKey;
use csmm_domain::value_objects::{LiquidityChange, ModifyLiquidityParams, SwapParams};
use csmm_engine::prelude::*;
use csmm_hook::custodian::ClaimSnapshot;
use csmm_hook::{ConstantSumHook, Rejection};
use csmm_ledger::InMemoryLedger;
use std::sync::Arc;

fn hook_address() -> Address {
    Address::from_low_u64_be(0x0a88)
}

fn key(fee: u32) -> PoolKey {
    PoolKey::new(
        Currency::from_low_u64(0x10),
        Currency::from_low_u64(0x20),
        fee,
        60,
        hook_address(),
    )
    .unwrap()
}

async fn funded_manager(owners: &[Address]) -> Arc<PoolManager<ConstantSumHook>> {
    let manager = PoolManager::new(
        ConstantSumHook::new(hook_address()),
        InMemoryLedger::new(),
        EngineConfig::default().with_log_settlements(true),
    );
    for owner in owners {
        for currency in [key(3000).currency0, key(3000).currency1] {
            manager.mint(*owner, currency, 1_000_000).await.unwrap();
        }
    }
    Arc::new(manager)
}

#[tokio::test]
async fn test_parallel_swaps_serialize_per_pool() {
    let swappers: Vec<Address> = (1..=16).map(Address::from_low_u64_be).collect();
    let manager = funded_manager(&swappers).await;
    manager.initialize(key(3000)).await.unwrap();
    manager
        .add_liquidity(&key(3000), swappers[0], 10_000)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for (i, swapper) in swappers.iter().copied().enumerate() {
        let manager = Arc::clone(&manager);
        handles.push(tokio::spawn(async move {
            let params = SwapParams::new(i % 2 == 0, 10);
            manager.swap(&key(3000), swapper, params).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Eight zeroForOne swaps add 80 claims, eight oneForZero swaps remove 80.
    assert_eq!(
        manager.claims(&key(3000)).await,
        ClaimSnapshot::new(10_000, 10_000)
    );
    let counters = manager.counters(key(3000).id()).await.unwrap();
    assert_eq!(counters.swaps, 16);
    assert_eq!(counters.deposits, 1);
}

#[tokio::test]
async fn test_pools_are_independent() {
    let lp = Address::from_low_u64_be(0x1f);
    let manager = funded_manager(&[lp]).await;
    let a = manager.initialize(key(3000)).await.unwrap();
    let b = manager.initialize(key(500)).await.unwrap();
    assert_ne!(a, b);

    manager.add_liquidity(&key(3000), lp, 100).await.unwrap();

    // Both pools share one custodian, so claims are shared too.
    assert_eq!(manager.claims(&key(500)).await, ClaimSnapshot::new(100, 100));
    assert_eq!(manager.counters(a).await.unwrap().deposits, 1);
    assert_eq!(manager.counters(b).await.unwrap().deposits, 0);
    assert_eq!(manager.pool_events(b).await.len(), 1);
}

#[tokio::test]
async fn test_gate_rejects_and_deposit_still_works() {
    let lp = Address::from_low_u64_be(0x1f);
    let manager = funded_manager(&[lp]).await;
    manager.initialize(key(3000)).await.unwrap();

    let add = ModifyLiquidityParams::full_range(LiquidityChange::Add(0));
    assert_eq!(
        manager.modify_liquidity(&key(3000), lp, add).await,
        Err(EngineError::Rejected(Rejection::AddLiquidityThroughHook))
    );

    manager.add_liquidity(&key(3000), lp, 250).await.unwrap();
    assert_eq!(
        manager.balance_of(lp, key(3000).currency0).await,
        1_000_000 - 250
    );
    assert_eq!(manager.reserves_of(key(3000).currency1).await, 250);
}

#[tokio::test]
async fn test_zero_deposit_rejected() {
    let lp = Address::from_low_u64_be(0x1f);
    let manager = funded_manager(&[lp]).await;
    manager.initialize(key(3000)).await.unwrap();

    assert!(manager.add_liquidity(&key(3000), lp, 0).await.is_err());
    assert_eq!(manager.counters(key(3000).id()).await.unwrap().deposits, 0);
}

#[tokio::test]
async fn test_event_capacity_bounds_history() {
    let lp = Address::from_low_u64_be(0x1f);
    let manager = PoolManager::new(
        ConstantSumHook::new(hook_address()),
        InMemoryLedger::new(),
        EngineConfig::default().with_event_capacity(2),
    );
    manager.mint(lp, key(3000).currency0, 100).await.unwrap();
    manager.mint(lp, key(3000).currency1, 100).await.unwrap();
    manager.initialize(key(3000)).await.unwrap();
    manager.add_liquidity(&key(3000), lp, 10).await.unwrap();
    manager
        .swap(&key(3000), lp, SwapParams::new(true, 5))
        .await
        .unwrap();

    let types: Vec<_> = manager
        .events()
        .await
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(types, vec![PoolEventType::Deposit, PoolEventType::Swap]);
}
