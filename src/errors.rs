use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    NotFound(u64),
    #[error("Nothing to restore")]
    EmptyUndo,
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// True for failures raised by the storage layer rather than by a rejected operation.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            LedgerError::Persistence(_) | LedgerError::Io(_) | LedgerError::Serde(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_family_is_classified() {
        assert!(LedgerError::Persistence("disk full".into()).is_persistence());
        assert!(LedgerError::Io(std::io::Error::other("boom")).is_persistence());
        assert!(!LedgerError::EmptyUndo.is_persistence());
        assert!(!LedgerError::NotFound(7).is_persistence());
    }

    #[test]
    fn not_found_names_the_id() {
        let message = LedgerError::NotFound(42).to_string();
        assert!(message.contains("42"), "unexpected message: {message}");
    }
}
