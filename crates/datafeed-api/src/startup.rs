//! Backend construction at process start.
//!
//! [`build_state`] turns an [`AppConfig`] into a ready [`AppState`]:
//! the store is connected and its collection created, and the broadcaster
//! is built (and connected, for NATS). Any failure here aborts startup.

use datafeed_broadcast::{
    BroadcastError, Broadcaster, LocalBroadcaster, NatsBroadcaster, PusherClient,
};
use datafeed_db::{DbError, MemoryPointStore, PgPointStore, PointStore, PostgresPool};
use tracing::info;

use crate::config::{AppConfig, BroadcastSettings, StoreSettings};
use crate::state::AppState;

/// Errors that can occur while bringing up the backends.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The document store could not be reached or prepared.
    #[error("store startup error: {0}")]
    Store(#[from] DbError),

    /// The broadcaster could not be built or connected.
    #[error("broadcast startup error: {0}")]
    Broadcast(#[from] BroadcastError),
}

/// Connect every backend named in `config` and assemble the shared state.
///
/// # Errors
///
/// Returns [`StartupError::Store`] if the initial store connection or
/// collection setup fails, and [`StartupError::Broadcast`] if the
/// broadcaster cannot be built.
pub async fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    let store = connect_store(&config.store).await?;
    info!(store = store.name(), "store gateway ready");

    let broadcaster = connect_broadcaster(&config.broadcast).await?;
    info!(broadcaster = broadcaster.name(), "broadcast gateway ready");

    Ok(AppState::new(store, broadcaster))
}

async fn connect_store(settings: &StoreSettings) -> Result<PointStore, DbError> {
    match settings {
        StoreSettings::Postgres(pg) => {
            let pool = PostgresPool::connect(pg).await?;
            let store = PgPointStore::new(pool, pg.table.clone());
            store.ensure_collection().await?;
            Ok(store.into())
        }
        StoreSettings::Memory => Ok(MemoryPointStore::new().into()),
    }
}

async fn connect_broadcaster(settings: &BroadcastSettings) -> Result<Broadcaster, BroadcastError> {
    match settings {
        BroadcastSettings::Pusher(pusher) => Ok(PusherClient::new(pusher.clone())?.into()),
        BroadcastSettings::Nats { url } => Ok(NatsBroadcaster::connect(url).await?.into()),
        BroadcastSettings::Local => Ok(LocalBroadcaster::new().into()),
    }
}
