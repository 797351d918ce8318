#![doc(test(attr(deny(warnings))))]

//! Spendwise ties the aggregation engine to a session, a record store,
//! locale-aware formatting and a small report shell.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod session;
pub mod store;
pub mod utils;

pub use spendwise_config as config;
pub use spendwise_core as core;
pub use spendwise_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendwise tracing initialized.");
    });
}
