//! tickpulse-dashboard - live viewer for signals and trade results.
//!
//! ```text
//! TickPipeline ──events──▶ Broadcaster ──mpsc per viewer──▶ /ws tasks
//!
//!  axum HTTP Server
//!   GET /         → Static HTML/JS
//!   GET /ws       → WebSocket event stream
//!   GET /health   → JSON liveness
//!   GET /metrics  → Prometheus text format
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use tickpulse_dashboard::{bind, serve, Broadcaster, DashboardConfig};
//!
//! let config = DashboardConfig::default();
//! let broadcaster = Broadcaster::new(config.subscriber_buffer);
//! let listener = bind(config.port).await?;
//! tokio::spawn(serve(listener, broadcaster.clone(), config));
//!
//! broadcaster.publish(&event);
//! ```

mod broadcast;
mod config;
mod error;
mod server;

pub use broadcast::{Broadcaster, PublishReport, SubscriberId, Subscription};
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use server::{bind, create_router, serve, AppState, ConnectionGuard, ConnectionLimiter};
