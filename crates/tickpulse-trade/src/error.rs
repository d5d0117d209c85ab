//! Trade error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TradeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
