//! `WebSocket` handler for the live data point feed.
//!
//! Clients connect to `GET /ws/data` and receive every notification the
//! in-process broadcaster publishes, as a JSON text frame:
//!
//! ```json
//! {"channel": "analytics-channel", "event": "new-data", "data": {...}}
//! ```
//!
//! The route only exists when `BROADCAST_BACKEND=local`; with an external
//! transport, subscribers attach to that transport instead.
//!
//! If a client falls behind, lagged messages are silently skipped and
//! the client resumes from the most recent notification.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use datafeed_broadcast::Notification;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming notifications.
///
/// # Route
///
/// `GET /ws/data`
pub async fn ws_data(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let Some(local) = state.broadcaster.local() else {
        return ApiError::NotFound(format!(
            "live feed is not served by the {} broadcaster",
            state.broadcaster.name()
        ))
        .into_response();
    };

    match ws {
        Ok(ws) => {
            // Subscribe before upgrading so nothing published in between is missed.
            let rx = local.subscribe();
            ws.on_upgrade(move |socket| handle_ws(socket, rx))
        }
        Err(rejection) => rejection.into_response(),
    }
}

/// Forward each notification as a text frame until the client leaves.
async fn handle_ws(mut socket: WebSocket, mut rx: broadcast::Receiver<Notification>) {
    debug!("WebSocket client connected");

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(notification) => {
                        let json = match serde_json::to_string(&notification) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!("Failed to serialize notification: {e}");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(json.into())).await.is_err() {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    // Clients have nothing to say on this feed.
                    _ => {}
                }
            }
        }
    }
}
