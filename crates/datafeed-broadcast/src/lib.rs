//! Broadcast gateway for the Datafeed service.
//!
//! Publishing is fire-and-forget: a call succeeds once the event has been
//! handed to the transport, and nothing is learned about individual
//! subscribers. [`Broadcaster`] dispatches to one of three transports:
//!
//! - [`pusher`] -- Pusher Channels HTTP API (signed `POST /apps/{id}/events`)
//! - [`nats`] -- NATS subject `{channel}.{event}`
//! - [`local`] -- In-process [`tokio::sync::broadcast`] channel, consumed
//!   by the API's `WebSocket` route
//!
//! The gateway is kept apart from the store gateway because its failure
//! semantics differ: a broadcast failure never implies lost data.

pub mod broadcaster;
pub mod error;
pub mod local;
pub mod nats;
pub mod pusher;

// Re-export primary types for convenience.
pub use broadcaster::Broadcaster;
pub use error::BroadcastError;
pub use local::{LocalBroadcaster, Notification};
pub use nats::NatsBroadcaster;
pub use pusher::{PusherClient, PusherConfig};
