//! Error types for the store gateway.
//!
//! Every failure reaching the HTTP layer through [`DbError`] means the
//! store is unavailable for that request: the connection could not be
//! acquired, the statement failed, or a stored document did not decode.

/// Errors that can occur in the store gateway.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
