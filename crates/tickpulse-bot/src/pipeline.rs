//! Per-tick processing: history, detection and trade evaluation.

use crate::config::AppConfig;
use tickpulse_core::{Price, TradeEvent, TradeOutcome};
use tickpulse_detector::{DetectorConfig, SignalDetector};
use tickpulse_feed::PriceHistory;
use tickpulse_trade::{TradeConfig, TradeQueue};
use tracing::trace;

/// Running totals since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub ticks: u64,
    pub signals: u64,
    pub wins: u64,
    pub losses: u64,
}

/// Owns all per-tick state. Every method takes `&mut self`, so a tick is
/// fully processed before the next one is looked at.
#[derive(Debug)]
pub struct TickPipeline {
    history: PriceHistory,
    detector: SignalDetector,
    queue: TradeQueue,
    stats: PipelineStats,
}

impl TickPipeline {
    pub fn new(history_capacity: usize, detector: DetectorConfig, trade: TradeConfig) -> Self {
        Self {
            history: PriceHistory::new(history_capacity),
            detector: SignalDetector::new(detector),
            queue: TradeQueue::new(trade),
            stats: PipelineStats::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.history.capacity,
            config.detector.clone(),
            config.trade.clone(),
        )
    }

    /// Process one tick and return the events it produced, in publish order.
    ///
    /// Open trades collect this price before a trade signalled on this tick
    /// is enqueued, so a new trade only sees later ticks. A SIGNAL comes
    /// before any TRADE_RESULT of the same tick.
    pub fn process_tick(&mut self, price: Price, now_ms: i64) -> Vec<TradeEvent> {
        self.stats.ticks += 1;
        let digit = self.history.update(price);
        trace!(%price, %digit, "Tick recorded");

        let decision = self.detector.check(&self.history, price, now_ms);
        let results = self.queue.advance_all(price, now_ms);

        let mut events = Vec::with_capacity(results.len() + 1);
        if let Some(decision) = decision {
            let (event, trade) = decision.into_parts();
            self.queue.push(trade);
            self.stats.signals += 1;
            events.push(event);
        }

        for result in results {
            match result.outcome {
                TradeOutcome::Win => self.stats.wins += 1,
                TradeOutcome::Loss => self.stats.losses += 1,
            }
            events.push(TradeEvent::TradeResult(result));
        }

        events
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    pub fn detector(&self) -> &SignalDetector {
        &self.detector
    }

    pub fn queue(&self) -> &TradeQueue {
        &self.queue
    }

    pub fn pending_trades(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }
}
