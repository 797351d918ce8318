use thiserror::Error;

use spendwise_config::ConfigError;
use spendwise_core::CoreError;

/// Error type for the application layer: snapshot files, the record store and
/// the crates it wraps.
#[derive(Debug, Error)]
pub enum SpendwiseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Record not found: {0}")]
    RecordNotFound(String),
}
