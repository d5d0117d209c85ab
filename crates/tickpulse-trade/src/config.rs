//! Trade configuration.

use crate::error::TradeError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tickpulse_core::Price;

/// Barrier offsets and window length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// Added to the start price for the upper barrier.
    pub barrier_upper: Decimal,
    /// Subtracted from the start price for the lower barrier.
    pub barrier_lower: Decimal,
    /// Ticks collected before evaluation.
    pub ticks_per_trade: usize,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            barrier_upper: Decimal::new(20, 1), // 2.0
            barrier_lower: Decimal::new(9, 1),  // 0.9
            ticks_per_trade: 5,
        }
    }
}

impl TradeConfig {
    pub fn validate(&self) -> Result<(), TradeError> {
        if self.ticks_per_trade == 0 {
            return Err(TradeError::ConfigError(
                "trade.ticks_per_trade must be greater than 0".to_string(),
            ));
        }
        if self.barrier_upper.is_sign_negative() || self.barrier_lower.is_sign_negative() {
            return Err(TradeError::ConfigError(format!(
                "trade barriers must not be negative (upper={}, lower={})",
                self.barrier_upper, self.barrier_lower
            )));
        }
        if self.barrier_upper > Price::MAX_QUOTE || self.barrier_lower > Price::MAX_QUOTE {
            return Err(TradeError::ConfigError(format!(
                "trade barriers must not exceed {} (upper={}, lower={})",
                Price::MAX_QUOTE,
                self.barrier_upper,
                self.barrier_lower
            )));
        }
        Ok(())
    }
}
