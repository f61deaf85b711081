//! Shared error type across metrod crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetrodError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MetrodError {
    /// Malformed client input (ingest payload shape).
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Config could not be loaded or failed validation.
    #[error("invalid config: {0}")]
    Config(String),
    /// Persistence failure (pool, transaction, or upsert).
    #[error("storage: {0}")]
    Storage(String),
    /// Graceful shutdown did not finish within the configured deadline.
    #[error("shutdown deadline exceeded")]
    ShutdownTimeout,
    #[error("internal: {0}")]
    Internal(String),
}
