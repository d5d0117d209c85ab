//! Pending trade queue.

use crate::barrier::Barriers;
use crate::config::TradeConfig;
use std::collections::BTreeMap;
use tickpulse_core::{PendingTrade, Price, TradeId, TradeResult};
use tracing::{debug, info};

/// Open trades keyed by id. Ids increase monotonically, so iteration
/// order is insertion order.
#[derive(Debug, Clone)]
pub struct TradeQueue {
    config: TradeConfig,
    trades: BTreeMap<TradeId, PendingTrade>,
    next_id: u64,
}

impl TradeQueue {
    pub fn new(config: TradeConfig) -> Self {
        Self {
            config,
            trades: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &TradeConfig {
        &self.config
    }

    pub fn push(&mut self, trade: PendingTrade) -> TradeId {
        let id = TradeId(self.next_id);
        self.next_id += 1;
        debug!(%id, start_price = %trade.start_price, "Trade opened");
        self.trades.insert(id, trade);
        id
    }

    pub fn get(&self, id: TradeId) -> Option<&PendingTrade> {
        self.trades.get(&id)
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Append `price` to every open trade and evaluate the ones that
    /// reach the target. Completed trades are removed after the pass;
    /// results come out oldest trade first.
    pub fn advance_all(&mut self, price: Price, now_ms: i64) -> Vec<TradeResult> {
        let target = self.config.ticks_per_trade;
        let mut completed = Vec::new();

        for (id, trade) in self.trades.iter_mut() {
            if trade.is_complete(target) {
                // left over from an earlier pass; drained below
                completed.push(*id);
                continue;
            }
            trade.collected.push(price);
            if trade.is_complete(target) {
                completed.push(*id);
            }
        }

        let mut results = Vec::with_capacity(completed.len());
        for id in completed {
            if let Some(trade) = self.trades.remove(&id) {
                let result = self.evaluate(trade, now_ms);
                info!(%id, outcome = %result.outcome, "Trade completed");
                results.push(result);
            }
        }
        results
    }

    fn evaluate(&self, trade: PendingTrade, now_ms: i64) -> TradeResult {
        let barriers = Barriers::around(
            trade.start_price,
            self.config.barrier_upper,
            self.config.barrier_lower,
        );
        let outcome = barriers.evaluate(&trade.collected);
        TradeResult {
            start_price: trade.start_price,
            prices: trade.collected,
            upper_barrier: barriers.upper,
            lower_barrier: barriers.lower,
            outcome,
            timestamp_ms: now_ms,
            pattern: trade.pattern,
        }
    }
}
