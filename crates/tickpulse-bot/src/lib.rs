//! Deriv tick-feed digit-pattern monitor.
//!
//! Orchestrates the components:
//! - Feed connection (authorize, subscribe, reconnect)
//! - Tick parsing and price history
//! - Repeating-digit signal detection with cooldown
//! - Pending trade evaluation against barriers
//! - Event broadcast to dashboard viewers

pub mod app;
pub mod config;
pub mod error;
pub mod pipeline;

pub use app::Application;
pub use config::{AppConfig, FeedConfig, TelemetryConfig};
pub use error::{AppError, AppResult};
pub use pipeline::{PipelineStats, TickPipeline};
