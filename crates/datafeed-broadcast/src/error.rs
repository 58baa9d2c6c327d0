//! Error types for the broadcast gateway.

/// Errors that can occur while dispatching a broadcast.
///
/// Only dispatch failures are represented. Whether any subscriber
/// received the event is never known to the caller.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// The payload could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request to the broadcast backend could not be completed.
    #[error("broadcast request failed: {0}")]
    Http(String),

    /// The broadcast backend answered with a non-success status.
    #[error("broadcast backend returned {status}: {body}")]
    Rejected {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The serialized payload exceeds the backend's event size limit.
    #[error("payload of {size} bytes exceeds the {limit} byte event limit")]
    PayloadTooLarge {
        /// Size of the serialized payload in bytes.
        size: usize,
        /// Maximum size accepted by the backend.
        limit: usize,
    },

    /// Failed to connect to or publish through the NATS server.
    #[error("NATS error: {0}")]
    Nats(String),

    /// The broadcaster is misconfigured.
    #[error("config error: {0}")]
    Config(String),
}
