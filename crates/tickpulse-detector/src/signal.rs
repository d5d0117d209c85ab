//! Detector output.

use tickpulse_core::{PendingTrade, SignalEvent, TradeEvent};

/// A fired signal: the event to publish and the trade to enqueue.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalDecision {
    pub event: SignalEvent,
    pub trade: PendingTrade,
}

impl SignalDecision {
    pub fn into_parts(self) -> (TradeEvent, PendingTrade) {
        (TradeEvent::Signal(self.event), self.trade)
    }
}
