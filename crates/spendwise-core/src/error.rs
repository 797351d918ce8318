use spendwise_domain::DateWindowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid window: {0}")]
    InvalidWindow(#[from] DateWindowError),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
