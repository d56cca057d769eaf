//! # Key-Value Persistence Port
//!
//! The storefront's durable state is string-keyed JSON blobs, the exact
//! shape the web client keeps in browser local storage. The port is a small
//! async trait so store logic can be tested against [`memory::MemoryKv`]
//! and run in production against [`sqlite::SqliteKv`].

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod sqlite;

// =============================================================================
// Port
// =============================================================================

/// String-keyed blob storage.
///
/// Implementations must be safe to share across tasks; every store holds
/// the backend behind an `Arc<dyn KvStore>`.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Writes `value` under `key`, replacing any previous blob.
    async fn put(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Removes the blob under `key`. Absent keys are a no-op.
    async fn delete(&self, key: &str) -> Result<(), KvError>;
}

// =============================================================================
// Errors
// =============================================================================

/// Key-value backend errors.
#[derive(Debug, Error)]
pub enum KvError {
    /// Backend could not be opened or reached.
    #[error("storage connection failed: {0}")]
    ConnectionFailed(String),

    /// A read or write failed.
    #[error("storage operation failed: {0}")]
    OperationFailed(String),

    /// All pooled connections are in use.
    #[error("storage connection pool exhausted")]
    PoolExhausted,
}

impl From<sqlx::Error> for KvError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => KvError::PoolExhausted,
            sqlx::Error::PoolClosed => KvError::ConnectionFailed("pool is closed".to_string()),
            other => KvError::OperationFailed(other.to_string()),
        }
    }
}
