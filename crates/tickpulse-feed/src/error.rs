//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Feed API error: {0}")]
    ApiError(String),

    #[error(transparent)]
    Core(#[from] tickpulse_core::CoreError),
}

pub type FeedResult<T> = Result<T, FeedError>;
