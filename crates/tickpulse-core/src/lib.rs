//! Core domain types for the tickpulse digit-pattern monitor.
//!
//! This crate provides the types shared by every other crate:
//! - `Price`: exact decimal quote (wire format: JSON number)
//! - `Digit`, `Pattern`: last-digit bookkeeping for pattern detection
//! - `PendingTrade`, `TradeResult`, `TradeOutcome`: trade evaluation window
//! - `TradeEvent`: the outbound SIGNAL / TRADE_RESULT wire messages

pub mod decimal;
pub mod digit;
pub mod error;
pub mod event;
pub mod time;
pub mod trade;

pub use decimal::Price;
pub use digit::{Digit, Pattern};
pub use error::{CoreError, Result};
pub use event::{SignalEvent, TradeEvent};
pub use time::{iso_millis, now_ms};
pub use trade::{PendingTrade, TradeId, TradeOutcome, TradeResult};
