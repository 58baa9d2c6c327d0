//! Transport dispatch for broadcasts.
//!
//! Uses enum dispatch instead of trait objects because async methods
//! are not dyn-compatible in Rust.

use serde::Serialize;

use crate::error::BroadcastError;
use crate::local::{LocalBroadcaster, Notification};
use crate::nats::NatsBroadcaster;
use crate::pusher::PusherClient;

/// The broadcast gateway handed to the HTTP layer.
#[derive(Debug, Clone)]
pub enum Broadcaster {
    /// Pusher Channels HTTP API.
    Pusher(PusherClient),
    /// NATS subjects.
    Nats(NatsBroadcaster),
    /// In-process channel, exposed over `WebSocket`.
    Local(LocalBroadcaster),
}

impl Broadcaster {
    /// Publish `payload` as `event` on `channel`, fire-and-forget.
    ///
    /// Succeeds once the transport has accepted the event. Not retried.
    ///
    /// # Errors
    ///
    /// Returns [`BroadcastError`] if the payload cannot be serialized or the
    /// transport refuses the dispatch.
    pub async fn publish<T>(&self, channel: &str, event: &str, payload: &T) -> Result<(), BroadcastError>
    where
        T: Serialize + ?Sized,
    {
        match self {
            Self::Pusher(client) => {
                let data = serde_json::to_string(payload)?;
                client.trigger(channel, event, &data).await
            }
            Self::Nats(client) => {
                let data = serde_json::to_vec(payload)?;
                client.publish(channel, event, data).await
            }
            Self::Local(local) => {
                let receivers = local.publish(Notification {
                    channel: channel.to_owned(),
                    event: event.to_owned(),
                    data: serde_json::to_value(payload)?,
                });
                tracing::debug!(channel, event, receivers, "published locally");
                Ok(())
            }
        }
    }

    /// The in-process broadcaster, when that is the active transport.
    pub const fn local(&self) -> Option<&LocalBroadcaster> {
        match self {
            Self::Local(local) => Some(local),
            Self::Pusher(_) | Self::Nats(_) => None,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pusher(_) => "pusher",
            Self::Nats(_) => "nats",
            Self::Local(_) => "local",
        }
    }
}

impl From<PusherClient> for Broadcaster {
    fn from(client: PusherClient) -> Self {
        Self::Pusher(client)
    }
}

impl From<NatsBroadcaster> for Broadcaster {
    fn from(client: NatsBroadcaster) -> Self {
        Self::Nats(client)
    }
}

impl From<LocalBroadcaster> for Broadcaster {
    fn from(local: LocalBroadcaster) -> Self {
        Self::Local(local)
    }
}
