//! Application orchestration.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::pipeline::TickPipeline;
use std::sync::Arc;
use std::time::Duration;
use tickpulse_core::{now_ms, TradeEvent};
use tickpulse_dashboard::Broadcaster;
use tickpulse_feed::TickParser;
use tickpulse_telemetry::Metrics;
use tickpulse_ws::{FeedConnection, WsMessage};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const FEED_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Main application.
pub struct Application {
    config: AppConfig,
    pipeline: TickPipeline,
    parser: TickParser,
    broadcaster: Broadcaster,
    shutdown_token: CancellationToken,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        let pipeline = TickPipeline::from_config(&config);
        let broadcaster = Broadcaster::new(config.dashboard.subscriber_buffer);
        Ok(Self {
            config,
            pipeline,
            parser: TickParser::new(),
            broadcaster,
            shutdown_token: CancellationToken::new(),
        })
    }

    /// Handle for publishing to (or subscribing on) the event fan-out.
    pub fn broadcaster(&self) -> Broadcaster {
        self.broadcaster.clone()
    }

    /// Cancelling this token stops `run` as Ctrl+C would.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    pub fn pipeline(&self) -> &TickPipeline {
        &self.pipeline
    }

    /// Run until shutdown or an unrecoverable feed error.
    pub async fn run(mut self) -> AppResult<()> {
        info!(market = %self.config.feed.market, "Starting application");

        // Bind first so a port conflict fails startup instead of a background task
        let dashboard_handle = if self.config.dashboard.enabled {
            let listener = tickpulse_dashboard::bind(self.config.dashboard.port).await?;
            info!(port = self.config.dashboard.port, "Dashboard listening");

            let broadcaster = self.broadcaster.clone();
            let config = self.config.dashboard.clone();
            Some(tokio::spawn(async move {
                if let Err(e) = tickpulse_dashboard::serve(listener, broadcaster, config).await {
                    error!(error = %e, "Dashboard server failed");
                }
            }))
        } else {
            info!("Dashboard disabled");
            None
        };

        let (message_tx, mut message_rx) =
            mpsc::channel::<WsMessage>(self.config.feed.channel_capacity);
        let connection = Arc::new(FeedConnection::new(
            self.config.connection_config(),
            message_tx,
        ));
        let connection_clone = connection.clone();
        let mut feed_handle = tokio::spawn(async move { connection_clone.run().await });

        let ctrl_c_token = self.shutdown_token.clone();
        let ctrl_c_handle = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                ctrl_c_token.cancel();
            }
        });

        info!("Entering main event loop");
        let shutdown = self.shutdown_token.clone();
        let mut feed_result: AppResult<()> = Ok(());
        let mut feed_finished = false;

        loop {
            tokio::select! {
                msg = message_rx.recv() => {
                    match msg {
                        Some(msg) => self.handle_message(msg),
                        None => {
                            debug!("Feed channel closed");
                            break;
                        }
                    }
                }

                joined = &mut feed_handle => {
                    feed_finished = true;
                    match joined {
                        Ok(Ok(())) => info!("Feed task finished"),
                        Ok(Err(e)) => {
                            error!(error = %e, "Feed task failed");
                            feed_result = Err(e.into());
                        }
                        Err(e) => error!(error = %e, "Feed task panicked"),
                    }
                    break;
                }

                () = shutdown.cancelled() => {
                    break;
                }
            }
        }

        info!("Shutting down");
        connection.shutdown();
        if !feed_finished {
            match tokio::time::timeout(FEED_SHUTDOWN_TIMEOUT, &mut feed_handle).await {
                Ok(_) => debug!("Feed task stopped"),
                Err(_) => {
                    warn!("Feed task did not stop in time, aborting");
                    feed_handle.abort();
                }
            }
        }
        if let Some(handle) = dashboard_handle {
            handle.abort();
        }
        ctrl_c_handle.abort();

        let stats = self.pipeline.stats();
        info!(
            ticks = stats.ticks,
            signals = stats.signals,
            wins = stats.wins,
            losses = stats.losses,
            pending = self.pipeline.pending_trades(),
            sessions = connection.session_count(),
            "Final statistics"
        );

        feed_result
    }

    /// Parse a feed message and run any tick through the pipeline.
    fn handle_message(&mut self, msg: WsMessage) {
        let tick = match self.parser.parse(&msg) {
            Ok(Some(tick)) => tick,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "Failed to parse tick, skipping");
                Metrics::parse_error("tick");
                return;
            }
        };

        let events = self.pipeline.process_tick(tick.price, now_ms());
        Metrics::tick_processed();

        for event in &events {
            match event {
                TradeEvent::Signal(signal) => {
                    Metrics::signal_emitted(signal.pattern.last().value());
                }
                TradeEvent::TradeResult(result) => {
                    Metrics::trade_completed(result.outcome.as_str());
                }
            }
            let report = self.broadcaster.publish(event);
            debug!(
                kind = event.kind(),
                delivered = report.delivered,
                lagged = report.lagged,
                "Event published"
            );
        }

        Metrics::pending_trades(self.pipeline.pending_trades());
    }
}
