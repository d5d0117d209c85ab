//! Signal detector.

use crate::config::DetectorConfig;
use crate::cooldown::CooldownState;
use crate::signal::SignalDecision;
use tickpulse_core::{PendingTrade, Price, SignalEvent};
use tickpulse_feed::PriceHistory;
use tracing::{debug, info};

/// Repeating-digit detector with cooldown.
#[derive(Debug, Clone)]
pub struct SignalDetector {
    config: DetectorConfig,
    cooldown: CooldownState,
}

impl SignalDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            cooldown: CooldownState::new(),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn last_signal_ms(&self) -> i64 {
        self.cooldown.last_signal_ms()
    }

    /// Check the newest history entry. `price` is the tick just recorded.
    ///
    /// State changes only when a signal fires.
    pub fn check(
        &mut self,
        history: &PriceHistory,
        price: Price,
        now_ms: i64,
    ) -> Option<SignalDecision> {
        let pattern = history.last_pair()?;
        if !pattern.is_repeat() {
            return None;
        }

        if !self.cooldown.is_ready(now_ms, self.config.cooldown_ms) {
            debug!(
                %pattern,
                since_last_ms = now_ms - self.cooldown.last_signal_ms(),
                "Pattern suppressed by cooldown"
            );
            return None;
        }

        self.cooldown.record(now_ms);
        info!(%price, %pattern, "Signal detected");

        Some(SignalDecision {
            event: SignalEvent::new(price, pattern, now_ms),
            trade: PendingTrade::new(price, pattern, now_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn history_of(prices: &[Decimal]) -> PriceHistory {
        let mut history = PriceHistory::new(100);
        for p in prices {
            history.update(Price::new(*p));
        }
        history
    }

    #[test]
    fn test_repeat_fires_and_sets_cooldown() {
        let mut detector = SignalDetector::new(DetectorConfig::default());
        let history = history_of(&[dec!(10.00), dec!(10.11), dec!(10.11)]);
        let price = Price::new(dec!(10.11));

        let decision = detector.check(&history, price, 1_706_400_000_000).unwrap();
        assert_eq!(decision.trade.start_price, price);
        assert!(decision.trade.collected.is_empty());
        assert_eq!(decision.trade.pattern.to_string(), "[1,1]");
        assert_eq!(decision.trade.timestamp_ms, 1_706_400_000_000);
        assert_eq!(decision.event.time, "2024-01-28T00:00:00.000Z");
        assert_eq!(detector.last_signal_ms(), 1_706_400_000_000);
    }

    #[test]
    fn test_no_repeat_no_signal() {
        let mut detector = SignalDetector::new(DetectorConfig::default());
        let history = history_of(&[dec!(10.11), dec!(10.12)]);
        assert!(detector
            .check(&history, Price::new(dec!(10.12)), 100_000)
            .is_none());
        assert_eq!(detector.last_signal_ms(), 0);
    }

    #[test]
    fn test_single_tick_no_signal() {
        let mut detector = SignalDetector::new(DetectorConfig { cooldown_ms: 0 });
        let history = history_of(&[dec!(10.11)]);
        assert!(detector
            .check(&history, Price::new(dec!(10.11)), 100_000)
            .is_none());
    }

    #[test]
    fn test_cooldown_suppresses_then_releases() {
        let mut detector = SignalDetector::new(DetectorConfig { cooldown_ms: 20_000 });
        let history = history_of(&[dec!(10.22), dec!(10.22)]);
        let price = Price::new(dec!(10.22));

        assert!(detector.check(&history, price, 50_000).is_some());
        assert!(detector.check(&history, price, 60_000).is_none());
        assert_eq!(detector.last_signal_ms(), 50_000);
        assert!(detector.check(&history, price, 70_000).is_some());
        assert_eq!(detector.last_signal_ms(), 70_000);
    }

    #[test]
    fn test_first_signal_fires_with_zero_initial_state() {
        let mut detector = SignalDetector::new(DetectorConfig::default());
        let history = history_of(&[dec!(1.55), dec!(2.05)]);
        assert!(detector
            .check(&history, Price::new(dec!(2.05)), 20_000)
            .is_some());
    }
}
