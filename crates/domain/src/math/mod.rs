//! Checked integer helpers.
//!
//! Amounts move between unsigned custody quantities (`u128`) and signed
//! deltas (`i128`). Every conversion here is checked; none of them wrap.

mod signed;

pub use signed::*;
