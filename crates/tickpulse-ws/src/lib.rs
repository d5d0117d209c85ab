//! WebSocket client for the Deriv tick feed.
//!
//! Provides a persistent feed connection with:
//! - Fixed-delay reconnection, unbounded by default
//! - Authorization (fire-and-continue, or awaiting the ack)
//! - Tick subscription for a single market symbol
//! - Heartbeat monitoring (`{"ping":1}` on idle, pong timeout detection)
//! - Ordered channel-based message forwarding

pub mod connection;
pub mod error;
pub mod heartbeat;
pub mod message;

pub use connection::{ConnectionConfig, ConnectionState, FeedConnection};
pub use error::{WsError, WsResult};
pub use message::{ApiError, WsMessage, WsRequest};
