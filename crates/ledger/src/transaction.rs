//! Journaled, all-or-nothing ledger transactions.
//!
//! A [`LedgerTransaction`] stages every write in an overlay on top of the
//! ledger. Reads see staged values first. Nothing reaches the ledger until
//! [`LedgerTransaction::commit`]; dropping the transaction discards it.

use crate::error::LedgerError;
use crate::memory::{InMemoryLedger, Slot, SlotStore, apply_credit, apply_debit};
use crate::settlement::{LedgerView, Settlement, SettlementMode};
use csmm_domain::currency::{Address, Currency};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Direction of a journaled movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Debit,
    Credit,
}

/// One successful debit or credit recorded by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub kind: EntryKind,
    pub currency: Currency,
    /// Payer for debits, payee for credits.
    pub account: Address,
    pub amount: u128,
    pub mode: SettlementMode,
}

/// Staged view of an [`InMemoryLedger`].
pub struct LedgerTransaction<'a> {
    ledger: &'a mut InMemoryLedger,
    staged: HashMap<Slot, u128>,
    journal: Vec<JournalEntry>,
    committed: bool,
}

impl<'a> LedgerTransaction<'a> {
    pub(crate) fn new(ledger: &'a mut InMemoryLedger) -> Self {
        Self {
            ledger,
            staged: HashMap::new(),
            journal: Vec::new(),
            committed: false,
        }
    }

    /// Movements recorded so far, in request order.
    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Applies every staged write to the ledger and returns the journal.
    pub fn commit(mut self) -> Vec<JournalEntry> {
        let staged = std::mem::take(&mut self.staged);
        self.ledger.apply(staged);
        self.committed = true;
        debug!(entries = self.journal.len(), "Ledger transaction committed");
        std::mem::take(&mut self.journal)
    }

    /// Discards every staged write.
    pub fn rollback(self) {
        drop(self);
    }

    fn record(
        &mut self,
        kind: EntryKind,
        currency: Currency,
        account: Address,
        amount: u128,
        mode: SettlementMode,
    ) {
        trace!(
            kind = ?kind,
            currency = %currency,
            account = ?account,
            amount,
            mode = %mode,
            "Journaled movement"
        );
        self.journal.push(JournalEntry {
            kind,
            currency,
            account,
            amount,
            mode,
        });
    }
}

impl Drop for LedgerTransaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            debug!(
                entries = self.journal.len(),
                "Ledger transaction rolled back"
            );
        }
    }
}

impl SlotStore for LedgerTransaction<'_> {
    fn read(&self, slot: Slot) -> u128 {
        match self.staged.get(&slot) {
            Some(value) => *value,
            None => self.ledger.read(slot),
        }
    }

    fn write(&mut self, slot: Slot, value: u128) {
        self.staged.insert(slot, value);
    }
}

impl LedgerView for LedgerTransaction<'_> {
    fn balance_of(&self, owner: Address, currency: Currency) -> u128 {
        self.read(Slot::Balance(owner, currency))
    }

    fn claims_of(&self, owner: Address, currency: Currency) -> u128 {
        self.read(Slot::Claim(owner, currency))
    }

    fn reserves_of(&self, currency: Currency) -> u128 {
        self.read(Slot::Reserve(currency))
    }
}

impl Settlement for LedgerTransaction<'_> {
    fn debit(
        &mut self,
        currency: Currency,
        payer: Address,
        amount: u128,
        mode: SettlementMode,
    ) -> Result<(), LedgerError> {
        apply_debit(self, currency, payer, amount, mode)?;
        self.record(EntryKind::Debit, currency, payer, amount, mode);
        Ok(())
    }

    fn credit(
        &mut self,
        currency: Currency,
        payee: Address,
        amount: u128,
        mode: SettlementMode,
    ) -> Result<(), LedgerError> {
        apply_credit(self, currency, payee, amount, mode)?;
        self.record(EntryKind::Credit, currency, payee, amount, mode);
        Ok(())
    }
}
