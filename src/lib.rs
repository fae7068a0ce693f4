#![doc(test(attr(deny(warnings))))]

//! Installment Engine derives month-scoped ledger views and installment plan
//! dashboards from a personal-finance transaction list.
//!
//! The [`ledger`] functions are pure: callers pass the transactions, a category
//! lookup, the target month or the current date, and get fresh view models back.

pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod services;
pub mod utils;

pub use config::{EngineConfig, UncategorizedPolicy};
pub use errors::{EngineError, EngineResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Installment engine tracing initialized.");
    });
}
