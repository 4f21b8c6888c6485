use crate::currency::Currency;
use thiserror::Error;

/// Errors raised while building or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("currencies out of order or equal: {currency0} must sort before {currency1}")]
    CurrenciesOutOfOrderOrEqual {
        currency0: Currency,
        currency1: Currency,
    },

    #[error("fee {fee} exceeds the maximum of {max}")]
    FeeTooLarge { fee: u32, max: u32 },

    #[error("tick spacing {0} is below the minimum")]
    TickSpacingTooSmall(i32),

    #[error("tick spacing {0} is above the maximum")]
    TickSpacingTooLarge(i32),

    #[error("invalid tick range [{lower}, {upper}]")]
    InvalidTickRange { lower: i32, upper: i32 },

    #[error("arithmetic overflow in {context}")]
    Overflow { context: &'static str },

    #[error("invalid hook permissions: {0}")]
    InvalidPermissions(&'static str),
}
