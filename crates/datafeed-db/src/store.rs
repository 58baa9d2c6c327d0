//! Backend dispatch for the data point collection.
//!
//! Uses enum dispatch instead of trait objects because async methods
//! are not dyn-compatible in Rust.

use datafeed_types::DataPoint;

use crate::document_store::PgPointStore;
use crate::error::DbError;
use crate::memory::MemoryPointStore;

/// The store gateway handed to the HTTP layer.
#[derive(Clone)]
pub enum PointStore {
    /// `JSONB` documents in `PostgreSQL`.
    Postgres(PgPointStore),
    /// In-process collection.
    Memory(MemoryPointStore),
}

impl PointStore {
    /// Persist a data point whose `time` has already been assigned.
    ///
    /// Not retried on failure.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backend rejects the write.
    pub async fn insert(&self, point: &DataPoint) -> Result<DataPoint, DbError> {
        match self {
            Self::Postgres(store) => store.insert(point).await,
            Self::Memory(store) => Ok(store.insert(point).await),
        }
    }

    /// Return every stored data point in store-native order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the scan fails. Partial results are never
    /// returned.
    pub async fn list_all(&self) -> Result<Vec<DataPoint>, DbError> {
        match self {
            Self::Postgres(store) => store.list_all().await,
            Self::Memory(store) => Ok(store.list_all().await),
        }
    }

    /// Release backend resources at shutdown. Later calls fail.
    ///
    /// The in-memory collection holds nothing to release.
    pub async fn close(&self) {
        match self {
            Self::Postgres(store) => store.close().await,
            Self::Memory(_) => {}
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

impl From<PgPointStore> for PointStore {
    fn from(store: PgPointStore) -> Self {
        Self::Postgres(store)
    }
}

impl From<MemoryPointStore> for PointStore {
    fn from(store: MemoryPointStore) -> Self {
        Self::Memory(store)
    }
}
