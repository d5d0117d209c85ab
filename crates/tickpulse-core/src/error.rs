//! Error types for tickpulse-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid digit: {0} (expected 0-9)")]
    InvalidDigit(u8),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
