//! Hook permission declarations.
//!
//! A hook declares which lifecycle callbacks the dispatcher must invoke.
//! The packed form places `before_initialize` at bit 13 down to
//! `after_remove_liquidity_return_delta` at bit 0.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

pub const BEFORE_INITIALIZE_FLAG: u16 = 1 << 13;
pub const AFTER_INITIALIZE_FLAG: u16 = 1 << 12;
pub const BEFORE_ADD_LIQUIDITY_FLAG: u16 = 1 << 11;
pub const AFTER_ADD_LIQUIDITY_FLAG: u16 = 1 << 10;
pub const BEFORE_REMOVE_LIQUIDITY_FLAG: u16 = 1 << 9;
pub const AFTER_REMOVE_LIQUIDITY_FLAG: u16 = 1 << 8;
pub const BEFORE_SWAP_FLAG: u16 = 1 << 7;
pub const AFTER_SWAP_FLAG: u16 = 1 << 6;
pub const BEFORE_DONATE_FLAG: u16 = 1 << 5;
pub const AFTER_DONATE_FLAG: u16 = 1 << 4;
pub const BEFORE_SWAP_RETURNS_DELTA_FLAG: u16 = 1 << 3;
pub const AFTER_SWAP_RETURNS_DELTA_FLAG: u16 = 1 << 2;
pub const AFTER_ADD_LIQUIDITY_RETURNS_DELTA_FLAG: u16 = 1 << 1;
pub const AFTER_REMOVE_LIQUIDITY_RETURNS_DELTA_FLAG: u16 = 1;

/// Which lifecycle callbacks a hook handles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookPermissions {
    pub before_initialize: bool,
    pub after_initialize: bool,
    pub before_add_liquidity: bool,
    pub after_add_liquidity: bool,
    pub before_remove_liquidity: bool,
    pub after_remove_liquidity: bool,
    pub before_swap: bool,
    pub after_swap: bool,
    pub before_donate: bool,
    pub after_donate: bool,
    pub before_swap_return_delta: bool,
    pub after_swap_return_delta: bool,
    pub after_add_liquidity_return_delta: bool,
    pub after_remove_liquidity_return_delta: bool,
}

impl HookPermissions {
    /// Packs the permissions into their flag bits.
    pub fn flags(&self) -> u16 {
        [
            (self.before_initialize, BEFORE_INITIALIZE_FLAG),
            (self.after_initialize, AFTER_INITIALIZE_FLAG),
            (self.before_add_liquidity, BEFORE_ADD_LIQUIDITY_FLAG),
            (self.after_add_liquidity, AFTER_ADD_LIQUIDITY_FLAG),
            (self.before_remove_liquidity, BEFORE_REMOVE_LIQUIDITY_FLAG),
            (self.after_remove_liquidity, AFTER_REMOVE_LIQUIDITY_FLAG),
            (self.before_swap, BEFORE_SWAP_FLAG),
            (self.after_swap, AFTER_SWAP_FLAG),
            (self.before_donate, BEFORE_DONATE_FLAG),
            (self.after_donate, AFTER_DONATE_FLAG),
            (self.before_swap_return_delta, BEFORE_SWAP_RETURNS_DELTA_FLAG),
            (self.after_swap_return_delta, AFTER_SWAP_RETURNS_DELTA_FLAG),
            (
                self.after_add_liquidity_return_delta,
                AFTER_ADD_LIQUIDITY_RETURNS_DELTA_FLAG,
            ),
            (
                self.after_remove_liquidity_return_delta,
                AFTER_REMOVE_LIQUIDITY_RETURNS_DELTA_FLAG,
            ),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(0, |acc, (_, flag)| acc | flag)
    }

    /// Rejects a return-delta permission declared without its base callback.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidPermissions`] naming the offending flag.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.before_swap_return_delta && !self.before_swap {
            return Err(DomainError::InvalidPermissions(
                "before_swap_return_delta requires before_swap",
            ));
        }
        if self.after_swap_return_delta && !self.after_swap {
            return Err(DomainError::InvalidPermissions(
                "after_swap_return_delta requires after_swap",
            ));
        }
        if self.after_add_liquidity_return_delta && !self.after_add_liquidity {
            return Err(DomainError::InvalidPermissions(
                "after_add_liquidity_return_delta requires after_add_liquidity",
            ));
        }
        if self.after_remove_liquidity_return_delta && !self.after_remove_liquidity {
            return Err(DomainError::InvalidPermissions(
                "after_remove_liquidity_return_delta requires after_remove_liquidity",
            ));
        }
        Ok(())
    }
}
