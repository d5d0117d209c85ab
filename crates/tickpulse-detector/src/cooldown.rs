//! Signal cooldown tracking.

/// Time of the most recent signal. Starts at 0, so the first qualifying
/// pattern always fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CooldownState {
    last_signal_ms: i64,
}

impl CooldownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_signal_ms(&self) -> i64 {
        self.last_signal_ms
    }

    /// Inclusive: exactly `cooldown_ms` after the last signal is ready.
    pub fn is_ready(&self, now_ms: i64, cooldown_ms: i64) -> bool {
        now_ms.saturating_sub(self.last_signal_ms) >= cooldown_ms
    }

    pub fn record(&mut self, now_ms: i64) {
        self.last_signal_ms = now_ms;
    }
}
