//! Trade evaluation window types.

use crate::decimal::Price;
use crate::digit::Pattern;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Queue-assigned trade identifier. Monotonically increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub u64);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trade_{}", self.0)
    }
}

/// An open evaluation window collecting post-signal ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTrade {
    /// Price at the moment of the signal.
    pub start_price: Price,
    /// Prices observed after the signal, oldest first.
    pub collected: Vec<Price>,
    /// Digits that triggered the signal.
    pub pattern: Pattern,
    /// Signal creation time (Unix milliseconds).
    pub timestamp_ms: i64,
}

impl PendingTrade {
    pub fn new(start_price: Price, pattern: Pattern, timestamp_ms: i64) -> Self {
        Self {
            start_price,
            collected: Vec::new(),
            pattern,
            timestamp_ms,
        }
    }

    pub fn collected_len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_complete(&self, target: usize) -> bool {
        self.collected.len() >= target
    }
}

/// Barrier test verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeOutcome {
    /// Every collected price stayed inside the barrier band.
    Win,
    /// At least one collected price left the band.
    Loss,
}

impl TradeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "WIN",
            Self::Loss => "LOSS",
        }
    }
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluated trade, published as `TRADE_RESULT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeResult {
    pub start_price: Price,
    pub prices: Vec<Price>,
    pub upper_barrier: Price,
    pub lower_barrier: Price,
    pub outcome: TradeOutcome,
    /// Evaluation time (Unix milliseconds).
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    pub pattern: Pattern,
}
