//! Heartbeat management for the feed connection.
//!
//! Tracks inbound activity and keepalive round trips so that a silently
//! stalled connection is detected and recycled.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::time::Duration;
use tracing::debug;

/// Heartbeat manager. An interval of 0 disables it.
pub struct HeartbeatManager {
    /// Idle time before a ping is sent.
    interval_ms: u64,
    /// How long to wait for the pong.
    timeout_ms: u64,
    last_ping: RwLock<Option<DateTime<Utc>>>,
    last_message: RwLock<DateTime<Utc>>,
    waiting_for_pong: RwLock<bool>,
}

impl HeartbeatManager {
    pub fn new(interval_ms: u64, timeout_ms: u64) -> Self {
        Self {
            interval_ms,
            timeout_ms,
            last_ping: RwLock::new(None),
            last_message: RwLock::new(Utc::now()),
            waiting_for_pong: RwLock::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_ms > 0
    }

    /// Reset heartbeat state (called on connection).
    pub fn reset(&self) {
        *self.last_ping.write() = None;
        *self.last_message.write() = Utc::now();
        *self.waiting_for_pong.write() = false;
    }

    pub fn record_ping(&self) {
        let now = Utc::now();
        *self.last_ping.write() = Some(now);
        *self.waiting_for_pong.write() = true;
        debug!(time = %now, "Recorded ping");
    }

    pub fn record_pong(&self) {
        *self.waiting_for_pong.write() = false;

        if let Some(ping_time) = *self.last_ping.read() {
            let rtt_ms = (Utc::now() - ping_time).num_milliseconds();
            debug!(rtt_ms, "Received pong");
        }
    }

    /// Record that any message was received.
    pub fn record_message(&self) {
        *self.last_message.write() = Utc::now();
    }

    pub fn is_timed_out(&self) -> bool {
        if !self.is_enabled() || !*self.waiting_for_pong.read() {
            return false;
        }

        match *self.last_ping.read() {
            Some(ping_time) => (Utc::now() - ping_time).num_milliseconds() > self.timeout_ms as i64,
            None => false,
        }
    }

    pub fn time_since_last_message_ms(&self) -> i64 {
        (Utc::now() - *self.last_message.read()).num_milliseconds()
    }

    /// Send a ping only when idle and not already waiting for a pong.
    pub fn should_send_heartbeat(&self) -> bool {
        if !self.is_enabled() || *self.waiting_for_pong.read() {
            return false;
        }
        self.time_since_last_message_ms() >= self.interval_ms as i64
    }

    /// Wait for the next heartbeat check. Never resolves when disabled.
    pub async fn wait_for_check(&self) {
        if !self.is_enabled() {
            std::future::pending::<()>().await;
        }
        let check_every = (self.interval_ms / 2).clamp(10, self.timeout_ms.max(10));
        tokio::time::sleep(Duration::from_millis(check_every)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heartbeat_initial_state() {
        let hb = HeartbeatManager::new(30000, 10000);
        assert!(hb.is_enabled());
        assert!(!hb.is_timed_out());
        assert!(!hb.should_send_heartbeat());
    }

    #[test]
    fn test_heartbeat_ping_pong() {
        let hb = HeartbeatManager::new(30000, 10000);

        hb.record_ping();
        assert!(*hb.waiting_for_pong.read());
        assert!(!hb.should_send_heartbeat());

        hb.record_pong();
        assert!(!*hb.waiting_for_pong.read());
    }

    #[test]
    fn test_heartbeat_times_out_without_pong() {
        let hb = HeartbeatManager::new(1, 0);
        *hb.last_ping.write() = Some(Utc::now() - chrono::Duration::milliseconds(50));
        *hb.waiting_for_pong.write() = true;
        assert!(hb.is_timed_out());
    }

    #[test]
    fn test_disabled_heartbeat_never_fires() {
        let hb = HeartbeatManager::new(0, 10000);
        *hb.last_message.write() = Utc::now() - chrono::Duration::seconds(600);
        assert!(!hb.should_send_heartbeat());
        hb.record_ping();
        assert!(!hb.is_timed_out());
    }
}
