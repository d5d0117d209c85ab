//! Outbound dashboard events.
//!
//! One JSON object per broadcast message, tagged by `type`:
//!
//! ```text
//! {"type":"SIGNAL","price":10.11,"time":"2024-01-28T00:00:00.000Z","pattern":[1,1]}
//! {"type":"TRADE_RESULT","startPrice":10.11,"prices":[...],"upperBarrier":12.11,
//!  "lowerBarrier":9.21,"outcome":"WIN","timestamp":1706400000000,"pattern":[1,1]}
//! ```

use crate::decimal::Price;
use crate::digit::Pattern;
use crate::time::iso_millis;
use crate::trade::TradeResult;
use serde::Serialize;

/// Pattern fired and a trade was opened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalEvent {
    pub price: Price,
    /// ISO-8601 UTC, millisecond precision, `Z` suffix.
    pub time: String,
    pub pattern: Pattern,
}

impl SignalEvent {
    pub fn new(price: Price, pattern: Pattern, timestamp_ms: i64) -> Self {
        Self {
            price,
            time: iso_millis(timestamp_ms),
            pattern,
        }
    }
}

/// Event broadcast to every dashboard subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TradeEvent {
    #[serde(rename = "SIGNAL")]
    Signal(SignalEvent),
    #[serde(rename = "TRADE_RESULT")]
    TradeResult(TradeResult),
}

impl TradeEvent {
    /// Wire name of the event type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Signal(_) => "SIGNAL",
            Self::TradeResult(_) => "TRADE_RESULT",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
