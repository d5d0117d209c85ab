//! Prometheus metrics for tickpulse.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means duplicate metric
//! names, which can only happen at static initialization.

use crate::error::TelemetryResult;
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge, register_gauge_vec, register_int_counter,
    register_int_gauge, CounterVec, Encoder, Gauge, GaugeVec, IntCounter, IntGauge, TextEncoder,
};

/// Feed connection state names, in state-machine order.
pub const FEED_STATES: [&str; 4] = ["disconnected", "connecting", "authenticating", "subscribed"];

/// Feed subscribed (1) or not (0).
pub static FEED_CONNECTED: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "tickpulse_feed_connected",
        "Feed connection subscribed (1=subscribed)"
    )
    .unwrap()
});

/// Feed state machine current state.
pub static FEED_STATE: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "tickpulse_feed_state",
        "Feed state machine current state (1=active, 0=inactive)",
        &["state"]
    )
    .unwrap()
});

pub static FEED_RECONNECT_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "tickpulse_feed_reconnect_total",
        "Total feed reconnections",
        &["reason"]
    )
    .unwrap()
});

/// Messages dropped before reaching the pipeline.
pub static PARSE_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "tickpulse_parse_errors_total",
        "Inbound messages that failed to parse",
        &["stage"]
    )
    .unwrap()
});

pub static TICKS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("tickpulse_ticks_total", "Ticks processed by the pipeline").unwrap()
});

pub static SIGNALS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "tickpulse_signals_total",
        "Signals emitted, by repeated digit",
        &["digit"]
    )
    .unwrap()
});

pub static TRADE_RESULTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "tickpulse_trade_results_total",
        "Completed trades by outcome",
        &["outcome"]
    )
    .unwrap()
});

pub static PENDING_TRADES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("tickpulse_pending_trades", "Trades still collecting ticks").unwrap()
});

pub static SUBSCRIBERS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("tickpulse_subscribers", "Connected dashboard subscribers").unwrap()
});

pub static BROADCAST_DELIVERED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "tickpulse_broadcast_delivered_total",
        "Event deliveries queued to subscribers"
    )
    .unwrap()
});

pub static BROADCAST_DROPPED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "tickpulse_broadcast_dropped_total",
        "Event deliveries dropped per subscriber",
        &["reason"]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    pub fn feed_state(state: &str) {
        for name in FEED_STATES {
            FEED_STATE
                .with_label_values(&[name])
                .set(if name == state { 1.0 } else { 0.0 });
        }
        FEED_CONNECTED.set(if state == "subscribed" { 1.0 } else { 0.0 });
    }

    pub fn feed_reconnect(reason: &str) {
        FEED_RECONNECT_TOTAL.with_label_values(&[reason]).inc();
    }

    pub fn parse_error(stage: &str) {
        PARSE_ERRORS_TOTAL.with_label_values(&[stage]).inc();
    }

    pub fn tick_processed() {
        TICKS_TOTAL.inc();
    }

    pub fn signal_emitted(digit: u8) {
        SIGNALS_TOTAL.with_label_values(&[&digit.to_string()]).inc();
    }

    pub fn trade_completed(outcome: &str) {
        TRADE_RESULTS_TOTAL.with_label_values(&[outcome]).inc();
    }

    pub fn pending_trades(count: usize) {
        PENDING_TRADES.set(count as i64);
    }

    pub fn subscribers(count: usize) {
        SUBSCRIBERS.set(count as i64);
    }

    pub fn broadcast_delivered(count: usize) {
        BROADCAST_DELIVERED_TOTAL.inc_by(count as u64);
    }

    pub fn broadcast_dropped(reason: &str, count: usize) {
        if count > 0 {
            BROADCAST_DROPPED_TOTAL
                .with_label_values(&[reason])
                .inc_by(count as f64);
        }
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn encode_text() -> TelemetryResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
