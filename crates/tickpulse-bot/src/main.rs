//! tickpulse - Deriv tick-feed digit-pattern monitor.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Deriv tick-feed digit-pattern monitor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via TICKPULSE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // CLI arg > TICKPULSE_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("TICKPULSE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    let config = tickpulse_bot::AppConfig::load(&config_path)?;

    tickpulse_telemetry::init_logging(&config.telemetry.log_level)?;

    info!("Starting tickpulse v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_path = %config_path,
        market = %config.feed.market,
        authorized = config.feed.api_token.is_some(),
        dashboard_port = config.dashboard.port,
        "Configuration loaded"
    );

    let app = tickpulse_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
