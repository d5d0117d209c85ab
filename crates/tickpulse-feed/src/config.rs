//! History configuration.

use crate::error::{FeedError, FeedResult};
use serde::{Deserialize, Serialize};

/// Price history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of retained ticks. Must be at least 2.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 1000 }
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> FeedResult<()> {
        if self.capacity < 2 {
            return Err(FeedError::InvalidData(format!(
                "history.capacity must be at least 2, got {}",
                self.capacity
            )));
        }
        Ok(())
    }
}
