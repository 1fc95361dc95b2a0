use crate::domain::ContactId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

/// Default per-subscriber channel capacity.
pub const DEFAULT_BUFFER: usize = 64;

/// The signal delivered after a successful commit.
///
/// Carries the kind of mutation and the affected id for logging on the
/// receiving side only; subscribers are expected to re-fetch full state
/// rather than interpret the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSignal {
    /// A contact was created or updated
    Saved(ContactId),

    /// A contact and everything it owned was removed
    Deleted(ContactId),
}

impl ChangeSignal {
    /// The contact the mutation touched.
    pub fn contact_id(&self) -> ContactId {
        match self {
            Self::Saved(id) | Self::Deleted(id) => *id,
        }
    }
}

type Registry = Mutex<HashMap<u64, mpsc::Sender<ChangeSignal>>>;

/// Fan-out publisher for "contacts changed" signals.
///
/// Subscribers connect and disconnect at any time; the registry lock is held
/// only to snapshot or prune, never while delivering, so registration can
/// interleave with an in-flight broadcast. A failed delivery to one
/// subscriber never blocks delivery to the others and never fails the
/// triggering call.
#[derive(Clone)]
pub struct ChangeBroadcaster {
    subscribers: Arc<Registry>,
    next_id: Arc<AtomicU64>,
    buffer: usize,
}

impl ChangeBroadcaster {
    /// Create a broadcaster whose subscriber channels hold `buffer` signals.
    pub fn new(buffer: usize) -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            buffer: buffer.max(1),
        }
    }

    /// Register a subscriber and hand back its receiving handle.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.insert(id, tx);
        }
        Subscription {
            id,
            rx,
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    /// Number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Deliver `signal` to every currently connected subscriber.
    ///
    /// Fire-and-forget from the caller's perspective: a full channel drops
    /// the signal for that subscriber (logged), a closed channel prunes the
    /// subscriber. Neither outcome is reported to the caller.
    pub fn broadcast(&self, signal: ChangeSignal) {
        let targets: Vec<(u64, mpsc::Sender<ChangeSignal>)> = match self.subscribers.lock() {
            Ok(subscribers) => subscribers
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect(),
            Err(_) => {
                warn!("subscriber registry lock poisoned, dropping broadcast");
                return;
            }
        };

        let mut disconnected = Vec::new();
        for (id, tx) in targets {
            match tx.try_send(signal) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(subscriber = id, "subscriber lagging, signal dropped");
                }
                Err(TrySendError::Closed(_)) => disconnected.push(id),
            }
        }

        if !disconnected.is_empty() {
            if let Ok(mut subscribers) = self.subscribers.lock() {
                for id in disconnected {
                    subscribers.remove(&id);
                    warn!(subscriber = id, "subscriber disconnected, pruned");
                }
            }
        }
    }
}

impl Default for ChangeBroadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER)
    }
}

/// Handle held by one connected subscriber.
///
/// Dropping the handle unregisters the subscriber.
pub struct Subscription {
    id: u64,
    rx: mpsc::Receiver<ChangeSignal>,
    subscribers: Arc<Registry>,
}

impl Subscription {
    /// Identifier of this subscriber within the registry.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Await the next signal; `None` once unsubscribed.
    pub async fn recv(&mut self) -> Option<ChangeSignal> {
        self.rx.recv().await
    }

    /// Non-blocking poll for a pending signal.
    pub fn try_recv(&mut self) -> Option<ChangeSignal> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.remove(&self.id);
        }
    }
}
