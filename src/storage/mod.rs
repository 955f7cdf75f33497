//! Load/save contract for the ledger and settings documents.

pub mod json_backend;
pub mod memory;

use serde_json::Value;

use crate::{config::Settings, errors::LedgerError, ledger::Transaction};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over stores able to hold the two persisted documents.
///
/// Saves are full-snapshot overwrites. Loading an absent document yields an
/// empty ledger or default settings rather than an error.
pub trait PersistenceGateway: Send + Sync {
    fn load_ledger(&self) -> Result<Vec<Transaction>>;
    fn save_ledger(&self, transactions: &[Transaction]) -> Result<()>;
    fn load_settings(&self) -> Result<Settings>;
    fn save_settings(&self, settings: &Settings) -> Result<()>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for std::sync::Arc<G> {
    fn load_ledger(&self) -> Result<Vec<Transaction>> {
        (**self).load_ledger()
    }

    fn save_ledger(&self, transactions: &[Transaction]) -> Result<()> {
        (**self).save_ledger(transactions)
    }

    fn load_settings(&self) -> Result<Settings> {
        (**self).load_settings()
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        (**self).save_settings(settings)
    }
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub fn encode_ledger(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// Parses a ledger document, skipping elements that are not valid records.
///
/// Fails only when the document itself is not a JSON array.
pub fn decode_ledger(data: &str) -> Result<Vec<Transaction>> {
    let values: Vec<Value> = serde_json::from_str(data)
        .map_err(|err| LedgerError::Persistence(format!("ledger document unreadable: {err}")))?;
    let mut transactions = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(value) {
            Ok(txn) => transactions.push(txn),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed transaction record");
            }
        }
    }
    Ok(transactions)
}

pub fn encode_settings(settings: &Settings) -> Result<String> {
    Ok(serde_json::to_string_pretty(settings)?)
}

pub fn decode_settings(data: &str) -> Result<Settings> {
    serde_json::from_str(data)
        .map_err(|err| LedgerError::Persistence(format!("settings document unreadable: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_skips_bad_records() {
        let data = r#"[
            {"id": 2, "description": "Salary", "amount": 1000, "type": "income", "date": "2024-01-02T09:00:00.000Z"},
            {"id": 1, "description": "Mystery", "amount": 5, "type": "transfer", "date": "2024-01-01T09:00:00.000Z"},
            {"id": "x"},
            42
        ]"#;
        let txns = decode_ledger(data).expect("array document decodes");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].id(), 2);
        assert_eq!(txns[0].amount(), 1000.0);
    }

    #[test]
    fn decode_rejects_non_array_document() {
        let err = decode_ledger(r#"{"transactions": []}"#).expect_err("object is not a ledger");
        assert!(err.is_persistence());
        assert!(decode_ledger("not json").is_err());
    }
}
