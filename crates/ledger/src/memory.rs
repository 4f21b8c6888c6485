//! In-memory reference ledger.

use crate::error::LedgerError;
use crate::settlement::{LedgerView, Settlement, SettlementMode};
use crate::transaction::LedgerTransaction;
use csmm_domain::currency::{Address, Currency};
use std::collections::HashMap;
use tracing::debug;

/// A single ledger cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Slot {
    Balance(Address, Currency),
    Claim(Address, Currency),
    Reserve(Currency),
}

/// Cell storage shared by the ledger and its transactions.
pub(crate) trait SlotStore {
    fn read(&self, slot: Slot) -> u128;
    fn write(&mut self, slot: Slot, value: u128);
}

/// Applies a debit to `store`. Nothing is written unless every check passes.
pub(crate) fn apply_debit<S: SlotStore>(
    store: &mut S,
    currency: Currency,
    payer: Address,
    amount: u128,
    mode: SettlementMode,
) -> Result<(), LedgerError> {
    match mode {
        SettlementMode::Transfer => {
            let slot = Slot::Balance(payer, currency);
            let available = store.read(slot);
            let remaining =
                available
                    .checked_sub(amount)
                    .ok_or(LedgerError::InsufficientFunds {
                        currency,
                        owner: payer,
                        requested: amount,
                        available,
                    })?;
            let reserve = Slot::Reserve(currency);
            let reserves = store
                .read(reserve)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow { currency })?;
            store.write(slot, remaining);
            store.write(reserve, reserves);
        }
        SettlementMode::Claim => {
            let slot = Slot::Claim(payer, currency);
            let available = store.read(slot);
            let remaining =
                available
                    .checked_sub(amount)
                    .ok_or(LedgerError::InsufficientClaims {
                        currency,
                        owner: payer,
                        requested: amount,
                        available,
                    })?;
            store.write(slot, remaining);
        }
    }
    Ok(())
}

/// Applies a credit to `store`. Nothing is written unless every check passes.
pub(crate) fn apply_credit<S: SlotStore>(
    store: &mut S,
    currency: Currency,
    payee: Address,
    amount: u128,
    mode: SettlementMode,
) -> Result<(), LedgerError> {
    match mode {
        SettlementMode::Transfer => {
            let reserve = Slot::Reserve(currency);
            let available = store.read(reserve);
            let reserves =
                available
                    .checked_sub(amount)
                    .ok_or(LedgerError::InsufficientReserves {
                        currency,
                        requested: amount,
                        available,
                    })?;
            let slot = Slot::Balance(payee, currency);
            let balance = store
                .read(slot)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow { currency })?;
            store.write(reserve, reserves);
            store.write(slot, balance);
        }
        SettlementMode::Claim => {
            let slot = Slot::Claim(payee, currency);
            let claims = store
                .read(slot)
                .checked_add(amount)
                .ok_or(LedgerError::Overflow { currency })?;
            store.write(slot, claims);
        }
    }
    Ok(())
}

/// Ledger that keeps every balance in a hash map.
///
/// Each direct [`Settlement`] call is atomic on its own. Use
/// [`InMemoryLedger::begin`] to group several calls into one
/// all-or-nothing unit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    cells: HashMap<Slot, u128>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `currency` out of thin air for `owner`.
    ///
    /// Used to fund accounts in tests and demos.
    ///
    /// # Errors
    /// Returns [`LedgerError::Overflow`] if the balance would overflow.
    pub fn mint(
        &mut self,
        owner: Address,
        currency: Currency,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let slot = Slot::Balance(owner, currency);
        let balance = self
            .read(slot)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow { currency })?;
        self.write(slot, balance);
        debug!(owner = ?owner, currency = %currency, amount, "Minted balance");
        Ok(())
    }

    /// Opens a journaled transaction over this ledger.
    pub fn begin(&mut self) -> LedgerTransaction<'_> {
        LedgerTransaction::new(self)
    }

    pub(crate) fn apply(&mut self, staged: HashMap<Slot, u128>) {
        for (slot, value) in staged {
            self.write(slot, value);
        }
    }
}

impl SlotStore for InMemoryLedger {
    fn read(&self, slot: Slot) -> u128 {
        self.cells.get(&slot).copied().unwrap_or(0)
    }

    fn write(&mut self, slot: Slot, value: u128) {
        if value == 0 {
            self.cells.remove(&slot);
        } else {
            self.cells.insert(slot, value);
        }
    }
}

impl LedgerView for InMemoryLedger {
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

impl Settlement for InMemoryLedger {
    fn debit(
        &mut self,
        currency: Currency,
        payer: Address,
        amount: u128,
        mode: SettlementMode,
    ) -> Result<(), LedgerError> {
        apply_debit(self, currency, payer, amount, mode)
    }

    fn credit(
        &mut self,
        currency: Currency,
        payee: Address,
        amount: u128,
        mode: SettlementMode,
    ) -> Result<(), LedgerError> {
        apply_credit(self, currency, payee, amount, mode)
    }
}
