#![doc(test(attr(deny(warnings))))]

//! Petty cash ledger: typed income and expense ledgers with exact decimal
//! totals, date lookups and combined summary reporting.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Petty cash ledger tracing initialized.");
    });
}
