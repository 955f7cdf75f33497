use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::{
    filter::{self, TransactionFilter},
    transaction::{IdGenerator, Transaction, TransactionKind},
    undo::UndoBuffer,
};
use crate::errors::LedgerError;

/// Ordered collection of transactions, newest first.
///
/// The ledger is the only writer of its sequence: `add` and `restore` prepend,
/// `remove` deletes by id and parks the removed entry in the undo buffer.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    ids: IdGenerator,
    undo: UndoBuffer,
}

/// Outcome of replacing the ledger contents from a stored snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrateReport {
    pub loaded: usize,
    /// Ids dropped because an earlier record already used them.
    pub duplicates: Vec<u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from stored records. See [`Ledger::hydrate`].
    pub fn from_records(records: Vec<Transaction>) -> (Self, HydrateReport) {
        let mut ledger = Self::new();
        let report = ledger.hydrate(records);
        (ledger, report)
    }

    /// Replaces the sequence wholesale with `records`, kept in stored order.
    ///
    /// Business rules are not re-checked. A record whose id was already seen is
    /// dropped so ids stay unique. The undo buffer is cleared.
    pub fn hydrate(&mut self, records: Vec<Transaction>) -> HydrateReport {
        let mut seen = HashSet::with_capacity(records.len());
        let mut report = HydrateReport::default();
        let mut ids = IdGenerator::new();
        let mut transactions = Vec::with_capacity(records.len());

        for record in records {
            if !seen.insert(record.id()) {
                tracing::warn!(id = record.id(), "skipping duplicate transaction id");
                report.duplicates.push(record.id());
                continue;
            }
            ids.observe(record.id());
            transactions.push(record);
        }

        report.loaded = transactions.len();
        self.transactions = transactions;
        self.ids = ids;
        self.undo.clear();
        report
    }

    /// Records a new transaction stamped with the current time.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
    ) -> Result<Transaction, LedgerError> {
        self.add_at(description, amount, kind, Utc::now())
    }

    /// Records a new transaction stamped with `now`.
    pub fn add_at(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
        now: DateTime<Utc>,
    ) -> Result<Transaction, LedgerError> {
        let mut ids = self.ids.clone();
        let id = ids.next_id(now)?;
        let transaction = Transaction::new(id, description, amount, kind, now)?;
        self.ids = ids;
        self.transactions.insert(0, transaction.clone());
        Ok(transaction)
    }

    /// Deletes the transaction with `id` and keeps a copy for [`Ledger::restore`].
    pub fn remove(&mut self, id: u64) -> Result<Transaction, LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id() == id)
            .ok_or(LedgerError::NotFound(id))?;
        let removed = self.transactions.remove(index);
        if let Some(dropped) = self.undo.hold(removed.clone()) {
            tracing::debug!(id = dropped.id(), "undo slot overwritten");
        }
        Ok(removed)
    }

    /// Puts the last removed transaction back at the front of the ledger.
    pub fn restore(&mut self) -> Result<Transaction, LedgerError> {
        let transaction = self.undo.take().ok_or(LedgerError::EmptyUndo)?;
        self.ids.observe(transaction.id());
        self.transactions.insert(0, transaction.clone());
        Ok(transaction)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.transaction(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn view(&self, filter: TransactionFilter) -> Vec<Transaction> {
        filter::view(&self.transactions, filter)
    }

    pub fn undo_buffer(&self) -> &UndoBuffer {
        &self.undo
    }

    pub fn can_restore(&self) -> bool {
        !self.undo.is_empty()
    }
}
