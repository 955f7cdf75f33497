#![doc(test(attr(deny(warnings))))]

//! Money Core is the ledger and aggregate engine behind a personal income and
//! expense tracker: recording entries, single-step undo, filtered history,
//! and the derived totals, reports, and chart series shown to the user.

pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Money Core tracing initialized.");
    });
}
