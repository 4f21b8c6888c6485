use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 160-bit account identity (depositors, swappers, the custodian).
pub type Address = H160;

/// Handle to one of the two tradable assets of a pool.
///
/// Currencies are totally ordered by address, which is what fixes the
/// `currency0` / `currency1` slots of a [`crate::pool::PoolKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency(pub Address);

impl Currency {
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    /// Builds a currency whose address is `value` in the low bytes.
    pub fn from_low_u64(value: u64) -> Self {
        Self(Address::from_low_u64_be(value))
    }

    pub fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for Currency {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
