//! Store gateway for the Datafeed service.
//!
//! Data points live in a single document collection. In production that
//! collection is a `PostgreSQL` table holding one `JSONB` document per
//! point; for local runs and tests an in-memory collection stands in.
//! Both are reached through [`PointStore`], which dispatches by enum
//! rather than trait object.
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`document_store`] -- `JSONB` document collection on `PostgreSQL`
//! - [`memory`] -- In-process collection
//! - [`store`] -- Backend dispatch used by the HTTP layer
//! - [`error`] -- Shared error types

pub mod document_store;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

// Re-export primary types for convenience.
pub use document_store::PgPointStore;
pub use error::DbError;
pub use memory::MemoryPointStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use store::PointStore;
