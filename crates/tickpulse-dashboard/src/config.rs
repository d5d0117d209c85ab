//! Dashboard configuration.

use serde::{Deserialize, Serialize};

/// Dashboard server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Enable dashboard server.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-viewer outbound buffer. A viewer that falls this far behind
    /// misses messages until it catches up.
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer: usize,
    /// Maximum concurrent WebSocket connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_port() -> u16 {
    3000
}

fn default_subscriber_buffer() -> usize {
    64
}

fn default_max_connections() -> usize {
    100
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            port: default_port(),
            subscriber_buffer: default_subscriber_buffer(),
            max_connections: default_max_connections(),
        }
    }
}
