//! Application services layered over the ledger: aggregates and the session.

pub mod services;
pub mod session;
pub mod utils;

pub use session::{Committed, Session};
