//! WebSocket error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WsError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection closed: code={code}, reason={reason}")]
    ConnectionClosed { code: u16, reason: String },

    #[error("Authorization failed: {0}")]
    AuthorizationFailed(String),

    #[error("Heartbeat timeout")]
    HeartbeatTimeout,

    #[error("Message receiver dropped")]
    ReceiverDropped,

    #[error("Tungstenite error: {0}")]
    Tungstenite(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WsError {
    /// Short label used as the reconnect reason in metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => "connection_failed",
            Self::ConnectionClosed { .. } => "closed",
            Self::AuthorizationFailed(_) => "authorization",
            Self::HeartbeatTimeout => "heartbeat_timeout",
            Self::ReceiverDropped => "receiver_dropped",
            Self::Tungstenite(_) => "transport",
            Self::Json(_) => "json",
        }
    }
}

pub type WsResult<T> = Result<T, WsError>;
