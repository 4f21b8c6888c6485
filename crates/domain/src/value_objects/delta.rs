use crate::error::DomainError;
use crate::math;
use crate::value_objects::swap::SwapParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-currency amounts owed between a caller and the pool.
///
/// Negative legs are owed by the caller, positive legs are owed to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDelta {
    pub amount0: i128,
    pub amount1: i128,
}

impl BalanceDelta {
    pub const ZERO: Self = Self {
        amount0: 0,
        amount1: 0,
    };

    pub fn new(amount0: i128, amount1: i128) -> Self {
        Self { amount0, amount1 }
    }

    pub fn is_zero(&self) -> bool {
        self.amount0 == 0 && self.amount1 == 0
    }

    /// # Errors
    /// Fails if either leg overflows.
    pub fn checked_add(self, other: Self) -> Result<Self, DomainError> {
        Ok(Self {
            amount0: math::checked_add(self.amount0, other.amount0, "delta amount0")?,
            amount1: math::checked_add(self.amount1, other.amount1, "delta amount1")?,
        })
    }

    /// # Errors
    /// Fails if either leg is `i128::MIN`.
    pub fn checked_neg(self) -> Result<Self, DomainError> {
        Ok(Self {
            amount0: math::checked_neg(self.amount0)?,
            amount1: math::checked_neg(self.amount1)?,
        })
    }
}

impl fmt::Display for BalanceDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.amount0, self.amount1)
    }
}

/// Delta a hook returns from its before-swap callback, keyed by leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeforeSwapDelta {
    /// Leg in the currency whose amount the caller fixed.
    pub specified: i128,
    /// Counter-leg.
    pub unspecified: i128,
}

impl BeforeSwapDelta {
    pub const ZERO: Self = Self {
        specified: 0,
        unspecified: 0,
    };

    pub fn new(specified: i128, unspecified: i128) -> Self {
        Self {
            specified,
            unspecified,
        }
    }

    /// Re-keys the legs by currency for the given swap.
    pub fn to_balance_delta(&self, params: &SwapParams) -> BalanceDelta {
        if params.specified_is_currency0() {
            BalanceDelta::new(self.specified, self.unspecified)
        } else {
            BalanceDelta::new(self.unspecified, self.specified)
        }
    }
}

impl fmt::Display for BeforeSwapDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.specified, self.unspecified)
    }
}
