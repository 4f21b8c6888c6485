use crate::currency::{Address, Currency};
use crate::error::DomainError;
use primitive_types::H256;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;

/// Maximum LP fee, in hundredths of a bip (100%).
pub const MAX_LP_FEE: u32 = 1_000_000;
/// Smallest accepted tick spacing.
pub const MIN_TICK_SPACING: i32 = 1;
/// Largest accepted tick spacing.
pub const MAX_TICK_SPACING: i32 = i16::MAX as i32;

/// Identity of a pool: the ordered currency pair plus its configuration.
///
/// The core never interprets `fee` or `tick_spacing`; they only feed the
/// derived [`PoolId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pub currency0: Currency,
    pub currency1: Currency,
    pub fee: u32,
    pub tick_spacing: i32,
    /// Address of the hook (and custodian) serving this pool.
    pub hooks: Address,
}

impl PoolKey {
    /// Creates a validated pool key.
    ///
    /// # Errors
    /// Returns an error if the currencies are not strictly ordered, the fee
    /// is above [`MAX_LP_FEE`], or the tick spacing is out of range.
    pub fn new(
        currency0: Currency,
        currency1: Currency,
        fee: u32,
        tick_spacing: i32,
        hooks: Address,
    ) -> Result<Self, DomainError> {
        let key = Self {
            currency0,
            currency1,
            fee,
            tick_spacing,
            hooks,
        };
        key.validate()?;
        Ok(key)
    }

    /// Checks the key invariants.
    ///
    /// # Errors
    /// See [`PoolKey::new`].
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.currency0 >= self.currency1 {
            return Err(DomainError::CurrenciesOutOfOrderOrEqual {
                currency0: self.currency0,
                currency1: self.currency1,
            });
        }
        if self.fee > MAX_LP_FEE {
            return Err(DomainError::FeeTooLarge {
                fee: self.fee,
                max: MAX_LP_FEE,
            });
        }
        if self.tick_spacing < MIN_TICK_SPACING {
            return Err(DomainError::TickSpacingTooSmall(self.tick_spacing));
        }
        if self.tick_spacing > MAX_TICK_SPACING {
            return Err(DomainError::TickSpacingTooLarge(self.tick_spacing));
        }
        Ok(())
    }

    /// Derives the pool identity.
    ///
    /// Keccak-256 over five 32-byte big-endian words, one per field in
    /// declaration order. Signed fields are sign-extended.
    pub fn id(&self) -> PoolId {
        let mut hasher = Keccak256::new();
        hasher.update(address_word(self.currency0.address()));
        hasher.update(address_word(self.currency1.address()));
        hasher.update(unsigned_word(u64::from(self.fee)));
        hasher.update(signed_word(i64::from(self.tick_spacing)));
        hasher.update(address_word(self.hooks));
        PoolId(H256::from_slice(&hasher.finalize()))
    }

    /// Returns `(currency0, currency1)`.
    pub fn currencies(&self) -> (Currency, Currency) {
        (self.currency0, self.currency1)
    }
}

fn address_word(address: Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

fn unsigned_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn signed_word(value: i64) -> [u8; 32] {
    let fill = if value < 0 { 0xff } else { 0x00 };
    let mut word = [fill; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Derived, immutable pool identity. Used as a lookup key only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId(pub H256);

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
