use crate::error::DomainError;

/// Returns `|value|` as an unsigned quantity.
///
/// `i128::MIN` is rejected: its magnitude fits in `u128` but the matching
/// negated delta does not fit in `i128`, so it can never be reported back.
pub fn magnitude(value: i128) -> Result<u128, DomainError> {
    if value == i128::MIN {
        return Err(DomainError::Overflow {
            context: "magnitude",
        });
    }
    Ok(value.unsigned_abs())
}

/// Negates a signed amount, failing instead of wrapping.
pub fn checked_neg(value: i128) -> Result<i128, DomainError> {
    value
        .checked_neg()
        .ok_or(DomainError::Overflow { context: "negate" })
}

/// Converts an unsigned quantity into a signed delta leg.
pub fn to_signed(value: u128) -> Result<i128, DomainError> {
    i128::try_from(value).map_err(|_| DomainError::Overflow {
        context: "to_signed",
    })
}

/// Adds two signed amounts, failing instead of wrapping.
pub fn checked_add(a: i128, b: i128, context: &'static str) -> Result<i128, DomainError> {
    a.checked_add(b).ok_or(DomainError::Overflow { context })
}
