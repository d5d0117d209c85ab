//! Deriv WebSocket API message types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Requests (Outgoing)
// ============================================================================

/// Outgoing request. Deriv identifies the call by its top-level key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WsRequest {
    /// `{"authorize": "<token>"}`
    Authorize { authorize: String },
    /// `{"ticks": "<symbol>", "subscribe": 1}`
    Ticks { ticks: String, subscribe: u8 },
    /// `{"ping": 1}`
    Ping { ping: u8 },
}

impl WsRequest {
    pub fn authorize(token: impl Into<String>) -> Self {
        Self::Authorize {
            authorize: token.into(),
        }
    }

    /// Streaming tick subscription for a market symbol.
    pub fn ticks(symbol: impl Into<String>) -> Self {
        Self::Ticks {
            ticks: symbol.into(),
            subscribe: 1,
        }
    }

    pub fn ping() -> Self {
        Self::Ping { ping: 1 }
    }
}

// ============================================================================
// Messages (Incoming)
// ============================================================================

/// Error payload attached to any response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Incoming message, discriminated by `msg_type`.
///
/// Only the fields this client acts on are typed; payloads stay as raw
/// JSON for the feed parser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WsMessage {
    #[serde(default)]
    pub msg_type: String,
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub tick: Option<serde_json::Value>,
    #[serde(default)]
    pub authorize: Option<serde_json::Value>,
    #[serde(default)]
    pub echo_req: Option<serde_json::Value>,
}

impl WsMessage {
    pub const TICK: &'static str = "tick";
    pub const AUTHORIZE: &'static str = "authorize";
    pub const PING: &'static str = "ping";

    pub fn is_tick(&self) -> bool {
        self.msg_type == Self::TICK
    }

    pub fn is_authorize(&self) -> bool {
        self.msg_type == Self::AUTHORIZE
    }

    /// Response to our `{"ping":1}` keepalive.
    pub fn is_pong(&self) -> bool {
        self.msg_type == Self::PING
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
