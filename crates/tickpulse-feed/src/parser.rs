//! Tick message parsing.
//!
//! Converts `msg_type: "tick"` feed messages into `PriceTick`s. The quote
//! is taken from its JSON text so the decimal value matches what the feed
//! sent, e.g. `{"tick":{"quote":1234.56,"epoch":1706400000,"symbol":"1HZ100V"}}`.

use crate::error::{FeedError, FeedResult};
use serde_json::Value;
use tickpulse_core::Price;
use tickpulse_ws::WsMessage;
use tracing::trace;

/// One price observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTick {
    pub price: Price,
    /// Feed timestamp (Unix seconds), when present.
    pub epoch: Option<i64>,
    pub symbol: Option<String>,
}

/// Stateless parser for inbound feed messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickParser;

impl TickParser {
    pub fn new() -> Self {
        Self
    }

    /// `Ok(None)` for anything that is not a tick.
    pub fn parse(&self, msg: &WsMessage) -> FeedResult<Option<PriceTick>> {
        if let Some(err) = &msg.error {
            return Err(FeedError::ApiError(err.to_string()));
        }
        if !msg.is_tick() {
            trace!(msg_type = %msg.msg_type, "Ignoring non-tick message");
            return Ok(None);
        }

        let tick = msg
            .tick
            .as_ref()
            .ok_or_else(|| FeedError::InvalidData("tick message without tick payload".to_string()))?;

        let price = parse_quote(tick.get("quote"))?;
        let epoch = tick.get("epoch").and_then(Value::as_i64);
        let symbol = tick
            .get("symbol")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Some(PriceTick {
            price,
            epoch,
            symbol,
        }))
    }
}

fn parse_quote(quote: Option<&Value>) -> FeedResult<Price> {
    match quote {
        Some(Value::Number(n)) => Ok(Price::parse_quote(&n.to_string())?),
        Some(Value::String(s)) => Ok(Price::parse_quote(s)?),
        Some(other) => Err(FeedError::ParseError(format!(
            "quote is not a number: {other}"
        ))),
        None => Err(FeedError::InvalidData("tick without quote".to_string())),
    }
}
