//! REST endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/data` | List all data points |
//! | `POST` | `/data` | Store and broadcast a data point |
//! | `OPTIONS` | `/data` | CORS preflight |
//!
//! CORS headers are attached by the router, not here.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use datafeed_types::{ANALYTICS_CHANNEL, DataPoint, NEW_DATA_EVENT, NewDataPoint};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Return every stored data point in store-native order.
///
/// An empty store yields `[]`.
pub async fn list_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DataPoint>>, ApiError> {
    let points = state.store.list_all().await.map_err(|e| {
        warn!(store = state.store.name(), store_error = %e, "listing data points failed");
        ApiError::from(e)
    })?;
    Ok(Json(points))
}

/// Store a new data point, then broadcast it.
///
/// The body is parsed by hand rather than through the `Json` extractor so
/// that every malformed body (bad syntax, wrong types, missing fields,
/// missing content type) is a 400 carrying the parser's message.
///
/// The insert and the publish are not atomic. When the publish fails the
/// point stays stored and the response is still a 500.
pub async fn create_data(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let new_point: NewDataPoint = serde_json::from_slice(&body)
        .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;

    let point = new_point.stamp(state.clock.now());

    let stored = state.store.insert(&point).await.map_err(|e| {
        warn!(
            store = state.store.name(),
            id = point.id,
            store_error = %e,
            "inserting data point failed"
        );
        ApiError::from(e)
    })?;

    if let Err(e) = state
        .broadcaster
        .publish(ANALYTICS_CHANNEL, NEW_DATA_EVENT, &stored)
        .await
    {
        warn!(
            broadcaster = state.broadcaster.name(),
            id = stored.id,
            broadcast_error = %e,
            "data point stored but broadcast failed"
        );
        return Err(ApiError::from(e));
    }

    info!(id = stored.id, value = stored.value, "data point created");
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Answer a CORS preflight. Touches neither backend.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
