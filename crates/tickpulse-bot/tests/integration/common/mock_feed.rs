//! Mock tick feed for integration tests.
//!
//! Accepts WebSocket connections and speaks enough of the Deriv protocol:
//! - `authorize` is acknowledged (or rejected for the token "bad-token")
//! - `ping` is answered with a pong
//! - `ticks` starts streaming the scripted quotes for this connection
//!
//! Every received text frame is recorded.

use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message};

pub const REJECTED_TOKEN: &str = "bad-token";

/// Quotes sent to one connection after it subscribes.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub quotes: Vec<f64>,
    /// Close the socket once the quotes are sent.
    pub close_after: bool,
}

impl Script {
    pub fn stream(quotes: &[f64]) -> Self {
        Self {
            quotes: quotes.to_vec(),
            close_after: false,
        }
    }

    pub fn then_close(quotes: &[f64]) -> Self {
        Self {
            quotes: quotes.to_vec(),
            close_after: true,
        }
    }
}

pub struct MockFeedServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    messages: Arc<Mutex<VecDeque<String>>>,
    connections: Arc<Mutex<u32>>,
}

impl MockFeedServer {
    /// Connection `n` (0-based) plays `scripts[n]`; later connections get nothing.
    pub async fn start(scripts: Vec<Script>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let messages: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(VecDeque::new()));
        let connections: Arc<Mutex<u32>> = Arc::new(Mutex::new(0));
        let scripts = Arc::new(scripts);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let messages_clone = messages.clone();
        let connections_clone = connections.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    Ok((stream, _)) = listener.accept() => {
                        let index = {
                            let mut count = connections_clone.lock().await;
                            *count += 1;
                            (*count - 1) as usize
                        };
                        let script = scripts.get(index).cloned().unwrap_or_default();
                        tokio::spawn(handle_connection(stream, script, messages_clone.clone()));
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            messages,
            connections,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    pub async fn connection_count(&self) -> u32 {
        *self.connections.lock().await
    }

    pub async fn received_messages(&self) -> Vec<String> {
        self.messages.lock().await.iter().cloned().collect()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

fn tick_message(symbol: &str, quote: f64, epoch: i64) -> String {
    json!({
        "echo_req": {"ticks": symbol, "subscribe": 1},
        "msg_type": "tick",
        "subscription": {"id": "mock-subscription"},
        "tick": {
            "ask": quote,
            "bid": quote,
            "epoch": epoch,
            "id": "mock-subscription",
            "pip_size": 2,
            "quote": quote,
            "symbol": symbol
        }
    })
    .to_string()
}

async fn handle_connection(
    stream: TcpStream,
    script: Script,
    messages: Arc<Mutex<VecDeque<String>>>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("WebSocket handshake failed: {}", e);
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                messages.lock().await.push_back(text.clone());

                let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&text) else {
                    continue;
                };

                if let Some(token) = parsed.get("authorize").and_then(|t| t.as_str()) {
                    let response = if token == REJECTED_TOKEN {
                        json!({
                            "echo_req": {"authorize": "<not shown>"},
                            "error": {"code": "InvalidToken", "message": "The token is invalid."},
                            "msg_type": "authorize"
                        })
                    } else {
                        json!({
                            "echo_req": {"authorize": "<not shown>"},
                            "authorize": {"loginid": "VRTC0000001", "currency": "USD"},
                            "msg_type": "authorize"
                        })
                    };
                    let _ = write.send(Message::Text(response.to_string())).await;
                } else if parsed.get("ping").is_some() {
                    let response = json!({"echo_req": {"ping": 1}, "msg_type": "ping", "ping": "pong"});
                    let _ = write.send(Message::Text(response.to_string())).await;
                } else if let Some(symbol) = parsed.get("ticks").and_then(|s| s.as_str()) {
                    for (i, quote) in script.quotes.iter().enumerate() {
                        let msg = tick_message(symbol, *quote, 1_706_400_000 + i as i64);
                        if write.send(Message::Text(msg)).await.is_err() {
                            return;
                        }
                    }
                    if script.close_after {
                        let _ = write.send(Message::Close(None)).await;
                        return;
                    }
                }
            }
            Ok(Message::Ping(data)) => {
                let _ = write.send(Message::Pong(data)).await;
            }
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            _ => {}
        }
    }
}
