use crate::error::DomainError;
use crate::math;
use serde::{Deserialize, Serialize};

/// A swap request as it arrives from the surrounding router.
///
/// `amount_specified > 0` is exact input, `< 0` is exact output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapParams {
    /// `true` swaps currency0 for currency1.
    pub zero_for_one: bool,
    pub amount_specified: i128,
}

impl SwapParams {
    pub fn new(zero_for_one: bool, amount_specified: i128) -> Self {
        Self {
            zero_for_one,
            amount_specified,
        }
    }

    pub fn is_exact_input(&self) -> bool {
        self.amount_specified > 0
    }

    /// Unsigned trade size, regardless of sign.
    ///
    /// # Errors
    /// Fails on `i128::MIN`.
    pub fn magnitude(&self) -> Result<u128, DomainError> {
        math::magnitude(self.amount_specified)
    }

    /// Whether the specified leg is currency0.
    ///
    /// Exact input fixes the input currency, exact output fixes the output
    /// currency, so currency0 is specified for zeroForOne exact input and
    /// for oneForZero exact output.
    pub fn specified_is_currency0(&self) -> bool {
        self.zero_for_one == self.is_exact_input()
    }
}
