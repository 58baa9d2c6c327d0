//! Data point collection backed by a `PostgreSQL` `JSONB` table.
//!
//! Each point is one document row. The table carries a surrogate
//! `BIGSERIAL` key because client identifiers are not unique. Scans are
//! deliberately unordered: callers get whatever order the planner yields.
//!
//! ```text
//! data
//!   seq       BIGSERIAL PRIMARY KEY
//!   document  JSONB NOT NULL      -- {"id", "value", "time"}
//! ```

use datafeed_types::DataPoint;
use sqlx::types::Json;

use crate::error::DbError;
use crate::postgres::PostgresPool;

/// Operations on the data point collection table.
#[derive(Clone)]
pub struct PgPointStore {
    pool: PostgresPool,
    table: String,
}

impl PgPointStore {
    /// Bind a store to a pool and a (pre-validated) table name.
    pub const fn new(pool: PostgresPool, table: String) -> Self {
        Self { pool, table }
    }

    /// Name of the backing table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the collection table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the statement fails.
    pub async fn ensure_collection(&self) -> Result<(), DbError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (seq BIGSERIAL PRIMARY KEY, document JSONB NOT NULL)",
            self.table
        );
        sqlx::query(&sql).execute(self.pool.pool()).await?;
        tracing::info!(table = self.table, "Data point collection ready");
        Ok(())
    }

    /// Persist one data point and return the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails or the returned
    /// document cannot be decoded.
    pub async fn insert(&self, point: &DataPoint) -> Result<DataPoint, DbError> {
        let sql = format!(
            "INSERT INTO {} (document) VALUES ($1) RETURNING document",
            self.table
        );
        let Json(stored) = sqlx::query_scalar::<_, Json<DataPoint>>(&sql)
            .bind(Json(point))
            .fetch_one(self.pool.pool())
            .await?;

        tracing::debug!(id = stored.id, "Inserted data point");
        Ok(stored)
    }

    /// Close the underlying pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Return every stored data point in store-native order.
    ///
    /// Either the whole collection decodes or the call fails; a single
    /// malformed document fails the scan.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails or any document
    /// cannot be decoded.
    pub async fn list_all(&self) -> Result<Vec<DataPoint>, DbError> {
        let sql = format!("SELECT document FROM {}", self.table);
        let rows = sqlx::query_scalar::<_, Json<DataPoint>>(&sql)
            .fetch_all(self.pool.pool())
            .await?;

        Ok(rows.into_iter().map(|Json(point)| point).collect())
    }
}
