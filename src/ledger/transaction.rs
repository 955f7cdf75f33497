use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Direction of a ledger entry. The amount itself is always positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Glyph shown in front of a formatted amount.
    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::Validation(format!(
                "unrecognized transaction type `{other}`"
            ))),
        }
    }
}

/// A recorded income or expense entry.
///
/// Serializes to the persisted record shape
/// `{ id, description, amount, type, date }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    id: u64,
    description: String,
    amount: f64,
    #[serde(rename = "type")]
    kind: TransactionKind,
    #[serde(rename = "date")]
    timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Builds a validated transaction. The description is stored trimmed.
    pub fn new(
        id: u64,
        description: &str,
        amount: f64,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::Validation("description must not be empty".into()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::Validation(format!(
                "amount must be a positive number, got {amount}"
            )));
        }
        Ok(Self {
            id,
            description: description.to_string(),
            amount,
            kind,
            timestamp,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the direction applied: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Issues transaction ids that never repeat within a ledger.
///
/// Ids follow the wall clock in milliseconds but are bumped past the last
/// issued id when the clock stalls or runs backwards.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails once the id space is exhausted, leaving the generator unchanged.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> Result<u64, LedgerError> {
        let clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let successor = self.last.checked_add(1).ok_or_else(|| {
            LedgerError::Validation(format!("no transaction id left after {}", self.last))
        })?;
        let id = clock.max(successor);
        self.last = id;
        Ok(id)
    }

    /// Records an id that was issued elsewhere so it is never handed out again.
    pub fn observe(&mut self, id: u64) {
        self.last = self.last.max(id);
    }

    pub fn last_issued(&self) -> u64 {
        self.last
    }
}
