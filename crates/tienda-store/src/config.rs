//! # Storage Configuration
//!
//! Pool and path configuration for the SQLite-backed key-value store.
//!
//! The default database location is the platform data directory
//! (`~/.local/share/tienda/tienda.db` on Linux, the Application Support
//! equivalent on macOS), falling back to the working directory when the
//! platform reports no home.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Storage configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StorageConfig::new("/path/to/tienda.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl StorageConfig {
    /// Creates a storage configuration with the given database path.
    /// The file is created on open if it does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StorageConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Creates an in-memory configuration (for testing).
    ///
    /// In-memory SQLite requires a single connection; a second connection
    /// would see a different, empty database.
    pub fn in_memory() -> Self {
        StorageConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }

    /// The platform-appropriate default database path.
    pub fn default_database_path() -> PathBuf {
        ProjectDirs::from("", "", "tienda")
            .map(|dirs| dirs.data_dir().join("tienda.db"))
            .unwrap_or_else(|| PathBuf::from("tienda.db"))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::new(Self::default_database_path())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
