use crate::error::DomainError;
use primitive_types::H256;
use serde::{Deserialize, Serialize};

/// Lowest usable tick.
pub const MIN_TICK: i32 = -887_272;
/// Highest usable tick.
pub const MAX_TICK: i32 = 887_272;

/// Direction and size of a generic liquidity modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidityChange {
    /// Mint liquidity units.
    Add(u128),
    /// Burn liquidity units.
    Remove(u128),
}

impl LiquidityChange {
    pub fn amount(&self) -> u128 {
        match self {
            Self::Add(amount) | Self::Remove(amount) => *amount,
        }
    }
}

/// Parameters of the generic (hook-gated) liquidity path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyLiquidityParams {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub change: LiquidityChange,
    /// Distinguishes positions of the same owner and range.
    pub salt: H256,
}

impl ModifyLiquidityParams {
    /// Creates params over the full tick range with a zero salt.
    pub fn full_range(change: LiquidityChange) -> Self {
        Self {
            tick_lower: MIN_TICK,
            tick_upper: MAX_TICK,
            change,
            salt: H256::zero(),
        }
    }

    /// # Errors
    /// Fails unless `MIN_TICK <= tick_lower < tick_upper <= MAX_TICK`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tick_lower >= self.tick_upper
            || self.tick_lower < MIN_TICK
            || self.tick_upper > MAX_TICK
        {
            return Err(DomainError::InvalidTickRange {
                lower: self.tick_lower,
                upper: self.tick_upper,
            });
        }
        Ok(())
    }
}
