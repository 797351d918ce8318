//! spendwise-config
//!
//! Persistent user preferences: display locale and currency plus the tunables the
//! dashboard and report views hand to the aggregation engine.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, CONFIG_KEYS};
