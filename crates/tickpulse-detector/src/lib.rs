//! Repeating-digit signal detection.
//!
//! Fires when the last two price digits are equal and the cooldown since
//! the previous signal has elapsed. A fired signal yields both the
//! outbound SIGNAL event and the trade it opens.

pub mod config;
pub mod cooldown;
pub mod detector;
pub mod error;
pub mod signal;

pub use config::DetectorConfig;
pub use cooldown::CooldownState;
pub use detector::SignalDetector;
pub use error::{DetectorError, DetectorResult};
pub use signal::SignalDecision;
