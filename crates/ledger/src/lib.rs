//! Settlement ledger for the constant-sum market maker.
//!
//! This crate provides the collaborator contract the core settles against:
//! - The [`Settlement`] debit/credit interface and its [`SettlementMode`]
//! - The [`LedgerView`] read side
//! - An in-memory reference ledger
//! - Journaled, all-or-nothing ledger transactions

/// Ledger error type.
pub mod error;
/// In-memory reference ledger.
pub mod memory;
/// Settlement traits.
pub mod settlement;
/// Journaled transactions.
pub mod transaction;

pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use settlement::{LedgerView, Settlement, SettlementMode};
pub use transaction::{EntryKind, JournalEntry, LedgerTransaction};
