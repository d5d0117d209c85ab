//! Application configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. TOML file (`config/default.toml` unless overridden)
//! 2. `TICKPULSE__<SECTION>__<KEY>` environment variables
//! 3. `TICKPULSE_API_TOKEN`, only when the file leaves `feed.api_token` unset

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tickpulse_dashboard::DashboardConfig;
use tickpulse_detector::DetectorConfig;
use tickpulse_feed::HistoryConfig;
use tickpulse_trade::TradeConfig;
use tickpulse_ws::ConnectionConfig;

pub const ENV_PREFIX: &str = "TICKPULSE";
pub const API_TOKEN_ENV: &str = "TICKPULSE_API_TOKEN";

/// Feed connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub ws_url: String,
    pub app_id: u32,
    /// Empty or missing skips authorization.
    pub api_token: Option<String>,
    /// Market symbol (e.g. "1HZ100V", "R_100").
    pub market: String,
    pub reconnect_delay_ms: u64,
    /// 0 = retry forever.
    pub max_reconnect_attempts: u32,
    /// 0 disables the keepalive ping.
    pub heartbeat_interval_ms: u64,
    pub heartbeat_timeout_ms: u64,
    pub await_authorization: bool,
    /// Buffer between the connection task and the tick pipeline.
    pub channel_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let conn = ConnectionConfig::default();
        Self {
            ws_url: conn.url,
            app_id: conn.app_id,
            api_token: None,
            market: conn.symbol,
            reconnect_delay_ms: conn.reconnect_delay_ms,
            max_reconnect_attempts: conn.max_reconnect_attempts,
            heartbeat_interval_ms: conn.heartbeat_interval_ms,
            heartbeat_timeout_ms: conn.heartbeat_timeout_ms,
            await_authorization: conn.await_authorization,
            channel_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub trade: TradeConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load from file plus environment, then validate.
    pub fn load(path: &str) -> AppResult<Self> {
        if !Path::new(path).exists() {
            return Err(AppError::Config(format!("config file not found: {path}")));
        }

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(Path::new(path)))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.apply_api_token(std::env::var(API_TOKEN_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document without environment layering.
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Fill `feed.api_token` from the environment when the file left it unset.
    pub fn apply_api_token(&mut self, token: Option<String>) {
        let unset = self.feed.api_token.as_deref().map_or(true, str::is_empty);
        if unset {
            if let Some(token) = token.filter(|t| !t.is_empty()) {
                self.feed.api_token = Some(token);
            }
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.feed.market.trim().is_empty() {
            return Err(AppError::Config("feed.market must not be empty".to_string()));
        }
        if self.feed.ws_url.trim().is_empty() {
            return Err(AppError::Config("feed.ws_url must not be empty".to_string()));
        }
        if self.feed.channel_capacity == 0 {
            return Err(AppError::Config(
                "feed.channel_capacity must be greater than 0".to_string(),
            ));
        }
        if self.dashboard.subscriber_buffer == 0 {
            return Err(AppError::Config(
                "dashboard.subscriber_buffer must be greater than 0".to_string(),
            ));
        }
        self.history.validate()?;
        self.detector.validate()?;
        self.trade.validate()?;
        Ok(())
    }

    /// Connection settings for the feed task.
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            url: self.feed.ws_url.clone(),
            app_id: self.feed.app_id,
            api_token: self.feed.api_token.clone().filter(|t| !t.is_empty()),
            symbol: self.feed.market.clone(),
            await_authorization: self.feed.await_authorization,
            max_reconnect_attempts: self.feed.max_reconnect_attempts,
            reconnect_delay_ms: self.feed.reconnect_delay_ms,
            heartbeat_interval_ms: self.feed.heartbeat_interval_ms,
            heartbeat_timeout_ms: self.feed.heartbeat_timeout_ms,
        }
    }
}
