//! Feed connection manager.
//!
//! Drives the `Disconnected -> Connecting -> Authenticating -> Subscribed`
//! state machine and falls back to `Disconnected` on any connection-level
//! error, retrying after a fixed delay.

use crate::error::{WsError, WsResult};
use crate::heartbeat::HeartbeatManager;
use crate::message::{WsMessage, WsRequest};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;
use tickpulse_telemetry::Metrics;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Feed endpoint without the `app_id` query parameter.
    pub url: String,
    /// Application identifier appended as `?app_id=`.
    pub app_id: u32,
    /// Credential token. `None` skips authorization.
    pub api_token: Option<String>,
    /// Market symbol to stream (e.g. "1HZ100V").
    pub symbol: String,
    /// Block on the `authorize` response before subscribing.
    pub await_authorization: bool,
    /// Maximum reconnection attempts (0 = infinite).
    pub max_reconnect_attempts: u32,
    /// Fixed delay between a disconnect and the next attempt.
    pub reconnect_delay_ms: u64,
    /// Idle time before a keepalive ping (0 = disabled).
    pub heartbeat_interval_ms: u64,
    /// Pong must arrive within this.
    pub heartbeat_timeout_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: "wss://ws.derivws.com/websockets/v3".to_string(),
            app_id: 1089,
            api_token: None,
            symbol: "1HZ100V".to_string(),
            await_authorization: false,
            max_reconnect_attempts: 0, // Infinite
            reconnect_delay_ms: 5000,
            heartbeat_interval_ms: 30000,
            heartbeat_timeout_ms: 10000,
        }
    }
}

impl ConnectionConfig {
    /// Full endpoint including the application identifier.
    ///
    /// A bare `ws://host:port` gets a `/` path so the request target stays
    /// valid once the query is appended.
    pub fn endpoint(&self) -> String {
        let (base, query) = match self.url.split_once('?') {
            Some((base, query)) => (base, query),
            None => (self.url.as_str(), ""),
        };
        let authority_start = base.find("://").map_or(0, |i| i + 3);
        let slash = if base[authority_start..].contains('/') { "" } else { "/" };
        if query.is_empty() {
            format!("{base}{slash}?app_id={}", self.app_id)
        } else {
            format!("{base}{slash}?{query}&app_id={}", self.app_id)
        }
    }
}

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Authenticating,
    Subscribed,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Authenticating => "authenticating",
            Self::Subscribed => "subscribed",
        }
    }
}

/// Persistent connection to the tick feed.
///
/// Every inbound message other than keepalive pongs and authorization
/// acks is forwarded, in arrival order, to the channel given at
/// construction. Sends await channel capacity, so nothing is dropped.
pub struct FeedConnection {
    config: ConnectionConfig,
    state: RwLock<ConnectionState>,
    heartbeat: HeartbeatManager,
    message_tx: mpsc::Sender<WsMessage>,
    reconnect_count: AtomicU32,
    /// Successful handshakes since construction.
    sessions: AtomicU64,
    shutdown_token: CancellationToken,
}

impl FeedConnection {
    pub fn new(config: ConnectionConfig, message_tx: mpsc::Sender<WsMessage>) -> Self {
        let heartbeat =
            HeartbeatManager::new(config.heartbeat_interval_ms, config.heartbeat_timeout_ms);
        Self {
            config,
            state: RwLock::new(ConnectionState::Disconnected),
            heartbeat,
            message_tx,
            reconnect_count: AtomicU32::new(0),
            sessions: AtomicU64::new(0),
            shutdown_token: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Consecutive failed attempts since the last successful handshake.
    pub fn reconnect_count(&self) -> u32 {
        self.reconnect_count.load(Ordering::Relaxed)
    }

    pub fn session_count(&self) -> u64 {
        self.sessions.load(Ordering::Relaxed)
    }

    /// Signal graceful shutdown of both the read loop and the backoff wait.
    pub fn shutdown(&self) {
        info!("FeedConnection shutdown requested");
        self.shutdown_token.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
        Metrics::feed_state(state.as_str());
        debug!(state = state.as_str(), "Feed state changed");
    }

    /// Run the connection until shutdown (or until the retry limit, if any).
    pub async fn run(&self) -> WsResult<()> {
        loop {
            if self.is_shutdown() {
                info!("Shutdown requested, exiting feed loop");
                self.set_state(ConnectionState::Disconnected);
                return Ok(());
            }

            self.set_state(ConnectionState::Connecting);

            match self.try_connect().await {
                Ok(()) => {
                    info!("Feed connection closed");
                }
                Err(WsError::ReceiverDropped) => {
                    warn!("Message receiver dropped, stopping feed");
                    self.set_state(ConnectionState::Disconnected);
                    return Err(WsError::ReceiverDropped);
                }
                Err(e) => {
                    error!(error = %e, "Feed connection error");
                    Metrics::feed_reconnect(e.label());
                }
            }

            self.set_state(ConnectionState::Disconnected);

            if self.is_shutdown() {
                info!("Shutdown requested after disconnect, not reconnecting");
                return Ok(());
            }

            let attempt = self.reconnect_count.fetch_add(1, Ordering::Relaxed) + 1;

            if self.config.max_reconnect_attempts > 0
                && attempt >= self.config.max_reconnect_attempts
            {
                error!(attempt, "Max reconnection attempts reached");
                return Err(WsError::ConnectionFailed(
                    "Max reconnection attempts reached".to_string(),
                ));
            }

            let delay = Duration::from_millis(self.config.reconnect_delay_ms);
            warn!(attempt, delay_ms = delay.as_millis() as u64, "Reconnecting");

            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown requested during backoff, exiting");
                    return Ok(());
                }
            }
        }
    }

    /// One session. `Ok(())` only on shutdown; every other exit is an error.
    async fn try_connect(&self) -> WsResult<()> {
        let endpoint = self.config.endpoint();
        info!(url = %endpoint, "Connecting to feed");

        let (ws_stream, _response) = tokio::select! {
            result = connect_async(endpoint.as_str()) => result?,
            () = self.shutdown_token.cancelled() => return Ok(()),
        };
        let (mut write, mut read) = ws_stream.split();

        self.reconnect_count.store(0, Ordering::Relaxed);
        self.sessions.fetch_add(1, Ordering::Relaxed);
        info!("Feed connected");

        self.set_state(ConnectionState::Authenticating);
        self.authenticate(&mut write, &mut read).await?;

        self.set_state(ConnectionState::Subscribed);
        send_request(&mut write, &WsRequest::ticks(&self.config.symbol)).await?;
        info!(symbol = %self.config.symbol, "Tick subscription sent");

        self.heartbeat.reset();

        loop {
            tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown signal received in message loop");
                    if let Err(e) = write.send(Message::Close(None)).await {
                        warn!(error = %e, "Failed to send Close frame during shutdown");
                    }
                    return Ok(());
                }

                frame = read.next() => {
                    if let Some(text) = self.handle_frame(frame, &mut write).await? {
                        self.handle_text_message(&text).await?;
                    }
                }

                () = self.heartbeat.wait_for_check() => {
                    if self.heartbeat.is_timed_out() {
                        error!("Heartbeat timeout");
                        return Err(WsError::HeartbeatTimeout);
                    }
                    if self.heartbeat.should_send_heartbeat() {
                        send_request(&mut write, &WsRequest::ping()).await?;
                        self.heartbeat.record_ping();
                        debug!("Sent heartbeat ping");
                    }
                }
            }
        }
    }

    async fn authenticate(&self, write: &mut WsSink, read: &mut WsSource) -> WsResult<()> {
        let Some(token) = self.config.api_token.as_deref() else {
            info!("No API token configured, skipping authorization");
            return Ok(());
        };

        send_request(write, &WsRequest::authorize(token)).await?;
        info!("Authorization request sent");

        if !self.config.await_authorization {
            return Ok(());
        }

        loop {
            let frame = tokio::select! {
                frame = read.next() => frame,
                () = self.shutdown_token.cancelled() => {
                    return Err(WsError::ConnectionFailed("shutdown during authorization".to_string()));
                }
            };
            let Some(text) = self.handle_frame(frame, write).await? else {
                continue;
            };

            match serde_json::from_str::<WsMessage>(&text) {
                Ok(msg) if msg.is_authorize() => {
                    if let Some(err) = msg.error {
                        return Err(WsError::AuthorizationFailed(err.to_string()));
                    }
                    info!("Authorization acknowledged");
                    return Ok(());
                }
                Ok(_) => self.handle_text_message(&text).await?,
                Err(e) => {
                    warn!(error = %e, "Unparseable message while awaiting authorization");
                    Metrics::parse_error("ws");
                }
            }
        }
    }

    /// Handle one read result. Returns text payloads; control frames are
    /// answered here and closures become errors.
    async fn handle_frame(
        &self,
        frame: Option<Result<Message, tungstenite::Error>>,
        write: &mut WsSink,
    ) -> WsResult<Option<String>> {
        match frame {
            Some(Ok(Message::Text(text))) => Ok(Some(text)),
            Some(Ok(Message::Ping(data))) => {
                debug!("Received ping, sending pong");
                write.send(Message::Pong(data)).await?;
                Ok(None)
            }
            Some(Ok(Message::Pong(_))) => {
                self.heartbeat.record_pong();
                Ok(None)
            }
            Some(Ok(Message::Close(frame))) => {
                let (code, reason): (u16, String) = frame
                    .map(|f| (f.code.into(), f.reason.to_string()))
                    .unwrap_or((1000, "Normal close".to_string()));
                warn!(code, %reason, "Feed closed by server");
                Err(WsError::ConnectionClosed { code, reason })
            }
            Some(Ok(_)) => Ok(None),
            Some(Err(e)) => {
                error!(error = %e, "Feed read error");
                Err(e.into())
            }
            None => {
                warn!("Feed stream ended");
                Err(WsError::ConnectionClosed {
                    code: 1006,
                    reason: "Stream ended".to_string(),
                })
            }
        }
    }

    /// Per-message handling. Bad messages are logged and skipped; the only
    /// error is a dropped receiver, which ends the session.
    async fn handle_text_message(&self, text: &str) -> WsResult<()> {
        self.heartbeat.record_message();

        let msg: WsMessage = match serde_json::from_str(text) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, "Failed to parse feed message, skipping");
                Metrics::parse_error("ws");
                return Ok(());
            }
        };

        if msg.is_pong() {
            self.heartbeat.record_pong();
            return Ok(());
        }

        if msg.is_authorize() {
            match &msg.error {
                Some(err) => warn!(error = %err, "Authorization rejected by feed"),
                None => info!("Authorization acknowledged"),
            }
            return Ok(());
        }

        if let Some(err) = &msg.error {
            warn!(msg_type = %msg.msg_type, error = %err, "Feed API error");
        }

        self.message_tx
            .send(msg)
            .await
            .map_err(|_| WsError::ReceiverDropped)
    }
}

async fn send_request(write: &mut WsSink, request: &WsRequest) -> WsResult<()> {
    let text = serde_json::to_string(request)?;
    write.send(Message::Text(text)).await?;
    Ok(())
}
