//! The constant-sum hook: custodian, coordinator, router and gate behind
//! one [`Hook`] implementation.

use crate::coordinator::DepositCoordinator;
use crate::custodian::Custodian;
use crate::error::HookError;
use crate::gate::LiquidityGate;
use crate::hook::{Hook, HookDecision, LiquidityCoordinator};
use crate::router::SwapRouter;
use csmm_domain::currency::Address;
use csmm_domain::permissions::HookPermissions;
use csmm_domain::pool::PoolKey;
use csmm_domain::value_objects::{ModifyLiquidityParams, SwapParams};
use csmm_ledger::Settlement;

/// 1:1 market maker serving every pool whose key names its address.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSumHook {
    custodian: Custodian,
    coordinator: DepositCoordinator,
    router: SwapRouter,
    gate: LiquidityGate,
}

impl ConstantSumHook {
    /// Creates a hook whose custodian identity is `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        let custodian = Custodian::new(address);
        Self {
            custodian,
            coordinator: DepositCoordinator::new(custodian),
            router: SwapRouter::new(custodian),
            gate: LiquidityGate,
        }
    }

    pub fn custodian(&self) -> &Custodian {
        &self.custodian
    }

    fn ensure_pool(&self, key: &PoolKey) -> Result<(), HookError> {
        if key.hooks != self.custodian.address() {
            return Err(HookError::PoolMismatch {
                pool: key.id(),
                hook: self.custodian.address(),
            });
        }
        Ok(())
    }
}

impl Hook for ConstantSumHook {
    fn address(&self) -> Address {
        self.custodian.address()
    }

    fn permissions(&self) -> HookPermissions {
        HookPermissions {
            before_add_liquidity: true,
            before_remove_liquidity: true,
            before_swap: true,
            before_swap_return_delta: true,
            ..Default::default()
        }
    }

    fn before_add_liquidity(
        &self,
        sender: Address,
        key: &PoolKey,
        params: &ModifyLiquidityParams,
    ) -> Result<HookDecision, HookError> {
        self.ensure_pool(key)?;
        Ok(self.gate.before_add_liquidity(sender, key, params))
    }

    fn before_remove_liquidity(
        &self,
        sender: Address,
        key: &PoolKey,
        params: &ModifyLiquidityParams,
    ) -> Result<HookDecision, HookError> {
        self.ensure_pool(key)?;
        Ok(self.gate.before_remove_liquidity(sender, key, params))
    }

    fn before_swap(
        &self,
        settlement: &mut dyn Settlement,
        _sender: Address,
        key: &PoolKey,
        params: &SwapParams,
    ) -> Result<HookDecision, HookError> {
        self.ensure_pool(key)?;
        let delta = self.router.route(settlement, key, params)?;
        Ok(HookDecision::Override(delta))
    }
}

impl LiquidityCoordinator for ConstantSumHook {
    fn add_liquidity(
        &self,
        settlement: &mut dyn Settlement,
        key: &PoolKey,
        depositor: Address,
        amount_each: u128,
    ) -> Result<(), HookError> {
        self.ensure_pool(key)?;
        self.coordinator
            .add_liquidity(settlement, key, depositor, amount_each)
    }
}
