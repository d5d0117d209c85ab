//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] ::config::ConfigError),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tickpulse_ws::WsError),

    #[error("Feed error: {0}")]
    Feed(#[from] tickpulse_feed::FeedError),

    #[error("Detector error: {0}")]
    Detector(#[from] tickpulse_detector::DetectorError),

    #[error("Trade error: {0}")]
    Trade(#[from] tickpulse_trade::TradeError),

    #[error("Dashboard error: {0}")]
    Dashboard(#[from] tickpulse_dashboard::DashboardError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] tickpulse_telemetry::TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
