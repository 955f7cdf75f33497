use super::transaction::Transaction;

/// Single-slot holder for the most recently removed transaction.
#[derive(Debug, Clone, Default)]
pub struct UndoBuffer {
    slot: Option<Transaction>,
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `transaction`, returning whatever it superseded.
    pub fn hold(&mut self, transaction: Transaction) -> Option<Transaction> {
        self.slot.replace(transaction)
    }

    pub fn take(&mut self) -> Option<Transaction> {
        self.slot.take()
    }

    pub fn peek(&self) -> Option<&Transaction> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
