//! Shared application state for the HTTP server.
//!
//! [`AppState`] is built once at startup and never mutated afterwards.
//! It holds the two long-lived backend handles, both safe for
//! concurrent use, and the clock that stamps new data points.

use datafeed_broadcast::Broadcaster;
use datafeed_db::PointStore;

use crate::clock::ServerClock;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
pub struct AppState {
    /// Store gateway for the data point collection.
    pub store: PointStore,
    /// Broadcast gateway for new data point notifications.
    pub broadcaster: Broadcaster,
    /// Stamps the write time of new data points.
    pub clock: ServerClock,
}

impl AppState {
    /// Assemble the state from already-connected backends.
    pub const fn new(store: PointStore, broadcaster: Broadcaster) -> Self {
        Self {
            store,
            broadcaster,
            clock: ServerClock::new(),
        }
    }
}
