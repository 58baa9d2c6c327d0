//! HTTP surface for the Datafeed service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /data`** -- every stored data point
//! - **`POST /data`** -- store a data point, then broadcast it as
//!   `new-data` on `analytics-channel`
//! - **`OPTIONS /data`** -- CORS preflight
//! - **`GET /ws/data`** -- `WebSocket` stream of broadcasts when the
//!   in-process broadcaster is active
//!
//! # Architecture
//!
//! Handlers share one immutable [`AppState`] holding the store gateway,
//! the broadcast gateway and the server clock. Nothing mutable lives in
//! the process between requests; the document store owns all data.
//!
//! A write is two sequential, non-transactional steps: insert, then
//! publish. If the publish fails the client gets a 500 even though the
//! point is already stored.
//!
//! [`AppState`]: state::AppState

pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use config::{AppConfig, ConfigError};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
