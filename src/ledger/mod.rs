//! Transaction ledger, undo slot, and history filters.

pub mod filter;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;
pub mod undo;

pub use filter::{view, TransactionFilter};
pub use ledger::{HydrateReport, Ledger};
pub use transaction::{IdGenerator, Transaction, TransactionKind};
pub use undo::UndoBuffer;
