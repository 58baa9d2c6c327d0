//! Error types for the HTTP surface.
//!
//! [`ApiError`] unifies all request failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Error
//! bodies are the bare error message as `text/plain`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use datafeed_broadcast::BroadcastError;
use datafeed_db::DbError;

/// Errors that can occur while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be parsed into a data point.
    #[error("{0}")]
    MalformedRequest(String),

    /// The document store could not complete the operation.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] DbError),

    /// The broadcast could not be dispatched.
    #[error("broadcast unavailable: {0}")]
    BroadcastUnavailable(#[from] BroadcastError),

    /// The requested resource does not exist in this configuration.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// The HTTP status this error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) | Self::BroadcastUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
