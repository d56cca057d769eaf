//! # SQLite Backend
//!
//! The durable [`KvStore`] backend: one `kv(key, value)` table over a
//! pooled, WAL-mode SQLite database. The schema is created idempotently
//! at open, so there is no separate migration step for a single table of
//! opaque blobs.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{KvError, KvStore};
use crate::config::StorageConfig;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (\n    key   TEXT PRIMARY KEY NOT NULL,\n    value TEXT NOT NULL\n)";

/// SQLite-backed key-value store.
#[derive(Debug, Clone)]
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    /// Opens (and if needed creates) the database and its schema.
    ///
    /// SQLite is configured the same way for every open:
    /// - WAL journal: readers do not block the writer
    /// - NORMAL synchronous: durable against corruption, may lose the
    ///   last transaction on a crash
    ///
    /// ## Example
    /// ```rust,ignore
    /// let kv = SqliteKv::open(StorageConfig::in_memory()).await?;
    /// ```
    pub async fn open(config: StorageConfig) -> Result<Self, KvError> {
        info!(
            path = %config.database_path.display(),
            "opening key-value store"
        );

        let connect_url = if config.database_path == std::path::Path::new(":memory:") {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}?mode=rwc", config.database_path.display())
        };

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| KvError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| KvError::ConnectionFailed(e.to_string()))?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        debug!("key-value schema ready");

        Ok(SqliteKv { pool })
    }

    /// Closes the connection pool. Call on application shutdown.
    pub async fn close(&self) {
        info!("closing key-value store");
        self.pool.close().await;
    }

    /// Checks if the store is responsive.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl KvStore for SqliteKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), KvError> {
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)\n             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
