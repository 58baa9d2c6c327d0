//! Axum router construction.
//!
//! Every response, including errors, 404s and 405s, carries the same three
//! CORS headers. They are set unconditionally instead of being negotiated
//! per request, so plain `OPTIONS` calls and browser preflights get
//! identical answers.

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Value of `Access-Control-Allow-Origin`.
pub const ALLOW_ORIGIN: &str = "*";

/// Value of `Access-Control-Allow-Methods`.
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Value of `Access-Control-Allow-Headers`.
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /data` -- list data points
/// - `POST /data` -- create a data point
/// - `OPTIONS /data` -- CORS preflight
/// - `GET /ws/data` -- `WebSocket` feed (local broadcaster only)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/data",
            get(handlers::list_data)
                .post(handlers::create_data)
                .options(handlers::preflight),
        )
        .route("/ws/data", get(ws::ws_data))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
