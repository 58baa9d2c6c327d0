//! In-process broadcast transport.
//!
//! Events are fanned out over a [`tokio::sync::broadcast`] channel. The
//! API's `WebSocket` route subscribes one receiver per connected client.
//! Publishing with no subscribers is not an error.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Capacity of the in-process broadcast channel.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// A published event as delivered to in-process subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Channel the event was published on.
    pub channel: String,
    /// Event name.
    pub event: String,
    /// Event payload. Object keys keep the payload's serialization order.
    pub data: serde_json::Value,
}

/// Sender side of the in-process broadcast channel.
#[derive(Debug, Clone)]
pub struct LocalBroadcaster {
    tx: broadcast::Sender<Notification>,
}

impl LocalBroadcaster {
    /// Create a broadcaster with no subscribers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Subscribe to every notification published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish a notification to all current subscribers.
    ///
    /// Returns the number of receivers that received the message.
    pub fn publish(&self, notification: Notification) -> usize {
        // send returns Err only when there are zero receivers,
        // which is normal when no WebSocket clients are connected.
        self.tx.send(notification).unwrap_or(0)
    }
}

impl Default for LocalBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
