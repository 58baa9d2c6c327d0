//! Datafeed server entry point.
//!
//! Stores numeric data points and broadcasts each new one to real-time
//! subscribers.
//!
//! # Startup Sequence
//!
//! 1. Load `.env` from the working directory, if present
//! 2. Load configuration from the environment
//! 3. Initialize structured logging (tracing)
//! 4. Connect the store and the broadcaster
//! 5. Serve HTTP until `Ctrl-C`
//! 6. Close the store

use std::sync::Arc;

use datafeed_api::config::LogFormat;
use datafeed_api::startup::build_state;
use datafeed_api::{AppConfig, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is missing or invalid, a backend
/// cannot be reached at startup, or the server fails to bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Variables already set in the environment take precedence.
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => return Err(e.into()),
        _ => {}
    }

    // 2. Load configuration.
    let config = AppConfig::from_env()?;

    // 3. Initialize structured logging.
    init_tracing(config.log_format);
    info!("datafeed starting");
    info!(
        host = config.server.host,
        port = config.server.port,
        store = ?config.store,
        broadcast = ?config.broadcast,
        "configuration loaded"
    );

    // 4. Connect backends.
    let state = Arc::new(build_state(&config).await?);

    // 5. Serve.
    let served = start_server(&config.server, Arc::clone(&state)).await;

    // 6. Drain the store pool even if serving failed.
    state.store.close().await;
    served?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
