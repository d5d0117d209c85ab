//! Prometheus metrics and structured logging for tickpulse.
//!
//! - Prometheus metrics for the feed connection, tick pipeline and broadcast
//! - Structured logging with tracing (JSON in production)

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
