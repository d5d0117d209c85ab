//! Detector configuration.

use crate::error::{DetectorError, DetectorResult};
use serde::{Deserialize, Serialize};

/// Configuration for signal detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum time between two signals. 0 lets every repeat fire.
    pub cooldown_ms: i64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 20_000, // 20s
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> DetectorResult<()> {
        if self.cooldown_ms < 0 {
            return Err(DetectorError::ConfigError(format!(
                "detector.cooldown_ms must not be negative, got {}",
                self.cooldown_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.cooldown_ms, 20_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_cooldown_rejected() {
        let config = DetectorConfig { cooldown_ms: -1 };
        assert!(config.validate().is_err());
    }
}
