//! Event fan-out to dashboard viewers.
//!
//! Each viewer owns a bounded mpsc receiver. `publish` serializes an event
//! once and offers it to every channel with `try_send`, so a slow viewer
//! loses messages without delaying the tick pipeline or other viewers.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tickpulse_core::TradeEvent;
use tickpulse_telemetry::Metrics;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer_{}", self.0)
    }
}

/// A registered viewer's end of the fan-out.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub receiver: mpsc::Receiver<Arc<str>>,
}

/// Outcome of one `publish` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    /// Buffer full; the message was skipped for that viewer only.
    pub lagged: usize,
    /// Receiver gone; the subscriber was pruned.
    pub closed: usize,
}

struct Inner {
    subscribers: RwLock<HashMap<SubscriberId, mpsc::Sender<Arc<str>>>>,
    next_id: AtomicU64,
    buffer: usize,
}

/// Cloneable handle to the shared subscriber set.
#[derive(Clone)]
pub struct Broadcaster {
    inner: Arc<Inner>,
}

impl Broadcaster {
    /// `buffer` is the per-subscriber channel capacity (at least 1).
    pub fn new(buffer: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                subscribers: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                buffer: buffer.max(1),
            }),
        }
    }

    pub fn register(&self) -> Subscription {
        let id = SubscriberId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, receiver) = mpsc::channel(self.inner.buffer);

        let count = {
            let mut subscribers = self.inner.subscribers.write();
            subscribers.insert(id, tx);
            subscribers.len()
        };
        Metrics::subscribers(count);
        debug!(%id, subscribers = count, "Subscriber registered");

        Subscription { id, receiver }
    }

    /// Idempotent.
    pub fn unregister(&self, id: SubscriberId) {
        let (removed, count) = {
            let mut subscribers = self.inner.subscribers.write();
            let removed = subscribers.remove(&id).is_some();
            (removed, subscribers.len())
        };
        if removed {
            Metrics::subscribers(count);
            debug!(%id, subscribers = count, "Subscriber unregistered");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }

    /// Deliver one event to every subscriber. Never blocks.
    pub fn publish(&self, event: &TradeEvent) -> PublishReport {
        let json: Arc<str> = match event.to_json() {
            Ok(json) => json.into(),
            Err(e) => {
                warn!(error = %e, kind = event.kind(), "Failed to serialize event");
                return PublishReport::default();
            }
        };
        self.publish_raw(json)
    }

    /// Deliver an already-serialized message.
    pub fn publish_raw(&self, message: Arc<str>) -> PublishReport {
        let mut report = PublishReport::default();
        let mut closed = Vec::new();

        {
            let subscribers = self.inner.subscribers.read();
            for (id, tx) in subscribers.iter() {
                match tx.try_send(Arc::clone(&message)) {
                    Ok(()) => report.delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        report.lagged += 1;
                        trace!(%id, "Subscriber buffer full, message skipped");
                    }
                    Err(TrySendError::Closed(_)) => closed.push(*id),
                }
            }
        }

        report.closed = closed.len();
        if !closed.is_empty() {
            let count = {
                let mut subscribers = self.inner.subscribers.write();
                for id in &closed {
                    subscribers.remove(id);
                }
                subscribers.len()
            };
            Metrics::subscribers(count);
            debug!(pruned = closed.len(), subscribers = count, "Pruned closed subscribers");
        }

        Metrics::broadcast_delivered(report.delivered);
        Metrics::broadcast_dropped("lagged", report.lagged);
        Metrics::broadcast_dropped("closed", report.closed);

        report
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}

impl fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("subscribers", &self.subscriber_count())
            .field("buffer", &self.inner.buffer)
            .finish()
    }
}
