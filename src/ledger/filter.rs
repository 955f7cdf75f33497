use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};
use crate::errors::LedgerError;

/// Selector for the transaction history list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Income => transaction.kind() == TransactionKind::Income,
            TransactionFilter::Expense => transaction.kind() == TransactionKind::Expense,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionFilter::All => "all",
            TransactionFilter::Income => "income",
            TransactionFilter::Expense => "expense",
        }
    }
}

impl From<TransactionKind> for TransactionFilter {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => TransactionFilter::Income,
            TransactionKind::Expense => TransactionFilter::Expense,
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionFilter {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TransactionFilter::All),
            other => other
                .parse::<TransactionKind>()
                .map(TransactionFilter::from)
                .map_err(|_| LedgerError::Validation(format!("unrecognized filter `{other}`"))),
        }
    }
}

/// Order-preserving copy of the transactions selected by `filter`.
pub fn view(transactions: &[Transaction], filter: TransactionFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| filter.matches(txn))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Vec<Transaction> {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        vec![
            Transaction::new(3, "Groceries", 60.0, TransactionKind::Expense, at).unwrap(),
            Transaction::new(2, "Salary", 2000.0, TransactionKind::Income, at).unwrap(),
            Transaction::new(1, "Rent", 900.0, TransactionKind::Expense, at).unwrap(),
        ]
    }

    #[test]
    fn all_returns_the_sequence_unchanged() {
        let txns = sample();
        assert_eq!(view(&txns, TransactionFilter::All), txns);
    }

    #[test]
    fn kind_filters_keep_ledger_order() {
        let ids: Vec<u64> = view(&sample(), TransactionFilter::Expense)
            .iter()
            .map(Transaction::id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(view(&sample(), TransactionFilter::Income).len(), 1);
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!("ALL".parse::<TransactionFilter>().unwrap(), TransactionFilter::All);
        assert_eq!("income".parse::<TransactionFilter>().unwrap(), TransactionFilter::Income);
        assert!("savings".parse::<TransactionFilter>().is_err());
    }
}
