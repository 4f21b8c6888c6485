//! Property tests for custody accounting under arbitrary operation sequences.

use csmm_domain::currency::{Address, Currency};
use csmm_domain::pool::PoolKey;
use csmm_domain::value_objects::{BeforeSwapDelta, SwapParams};
use csmm_hook::prelude::*;
use csmm_ledger::{InMemoryLedger, LedgerView};
use proptest::prelude::*;

fn hook() -> ConstantSumHook {
    ConstantSumHook::new(Address::from_low_u64_be(0x0a88))
}

fn key() -> PoolKey {
    PoolKey::new(
        Currency::from_low_u64(1),
        Currency::from_low_u64(2),
        3000,
        60,
        hook().address(),
    )
    .unwrap()
}

fn depositor() -> Address {
    Address::from_low_u64_be(0xd0)
}

#[derive(Debug, Clone)]
enum Op {
    Deposit(u128),
    Swap(bool, i128),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u128..10_000).prop_map(Op::Deposit),
        (any::<bool>(), -5_000i128..5_000).prop_map(|(z, a)| Op::Swap(z, a)),
    ]
}

proptest! {
    /// Claims always equal deposits plus/minus routed swap magnitudes,
    /// stay equal across both currencies, and never go negative.
    #[test]
    fn prop_claims_track_deposits_and_swaps(ops in prop::collection::vec(op(), 1..40)) {
        let hook = hook();
        let key = key();
        let mut ledger = InMemoryLedger::new();
        ledger.mint(depositor(), key.currency0, u128::from(u64::MAX)).unwrap();
        ledger.mint(depositor(), key.currency1, u128::from(u64::MAX)).unwrap();

        let mut expected: u128 = 0;
        for op in ops {
            let mut tx = ledger.begin();
            let result = match op {
                Op::Deposit(amount) => hook
                    .add_liquidity(&mut tx, &key, depositor(), amount)
                    .map(|_| expected + amount),
                Op::Swap(zero_for_one, amount) => {
                    let params = SwapParams::new(zero_for_one, amount);
                    let magnitude = amount.unsigned_abs();
                    hook.before_swap(&mut tx, depositor(), &key, &params).map(|_| {
                        if zero_for_one { expected + magnitude } else { expected - magnitude }
                    })
                }
            };
            match result {
                Ok(next) => {
                    tx.commit();
                    expected = next;
                }
                Err(_) => tx.rollback(),
            }

            let claims = hook.custodian().claims(&ledger, &key);
            prop_assert_eq!(claims.claim0, expected);
            prop_assert_eq!(claims.claim1, expected);
        }
    }

    /// A oneForZero swap succeeds exactly when the custodian's claims cover it.
    #[test]
    fn prop_redeem_succeeds_iff_covered(seed in 0u128..1_000, amount in -2_000i128..2_000) {
        let hook = hook();
        let key = key();
        let mut ledger = InMemoryLedger::new();
        hook.custodian().issue_claims(&mut ledger, key.currency0, seed).unwrap();
        hook.custodian().issue_claims(&mut ledger, key.currency1, seed).unwrap();

        let mut tx = ledger.begin();
        let result = hook.before_swap(&mut tx, depositor(), &key, &SwapParams::new(false, amount));
        prop_assert_eq!(result.is_ok(), amount.unsigned_abs() <= seed);
        tx.rollback();
    }

    /// specified == -amount_specified and unspecified == amount_specified.
    #[test]
    fn prop_one_to_one_exchange_law(zero_for_one in any::<bool>(), amount in (i128::MIN + 1)..=i128::MAX) {
        let delta = SwapRouter::quote(&SwapParams::new(zero_for_one, amount)).unwrap();
        prop_assert_eq!(delta, BeforeSwapDelta::new(-amount, amount));
    }

    /// A deposit either credits exactly `amount_each` on both currencies or
    /// changes nothing.
    #[test]
    fn prop_deposit_is_all_or_nothing(funds0 in 0u128..1_000, funds1 in 0u128..1_000, amount in 0u128..1_000) {
        let hook = hook();
        let key = key();
        let mut ledger = InMemoryLedger::new();
        ledger.mint(depositor(), key.currency0, funds0).unwrap();
        ledger.mint(depositor(), key.currency1, funds1).unwrap();

        let mut tx = ledger.begin();
        let ok = hook.add_liquidity(&mut tx, &key, depositor(), amount).is_ok();
        if ok { tx.commit(); } else { tx.rollback(); }

        prop_assert_eq!(ok, amount > 0 && amount <= funds0 && amount <= funds1);
        let credited = if ok { amount } else { 0 };
        prop_assert_eq!(hook.custodian().claims(&ledger, &key), ClaimSnapshot::new(credited, credited));
        prop_assert_eq!(ledger.balance_of(depositor(), key.currency0), funds0 - credited);
        prop_assert_eq!(ledger.balance_of(depositor(), key.currency1), funds1 - credited);
    }
}

#[test]
fn test_min_amount_rejected_in_both_directions() {
    let hook = hook();
    let mut ledger = InMemoryLedger::new();
    for zero_for_one in [true, false] {
        let mut tx = ledger.begin();
        let err = hook
            .before_swap(
                &mut tx,
                depositor(),
                &key(),
                &SwapParams::new(zero_for_one, i128::MIN),
            )
            .unwrap_err();
        assert!(matches!(err, HookError::Domain(_)));
        assert!(tx.journal().is_empty());
    }
}
