//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Terminal startup                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐                        │                           │
//! │  │  │Conn1│ │Conn2│  (max_connections)     │                           │
//! │  │  └─────┘ └─────┘                        │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases use SQLite WAL (Write-Ahead Logging) so a second
//! MarketCalc window reading preferences never blocks the one writing them.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::preference::PreferenceRepository;

/// Path that selects a private in-memory database.
const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust
/// use marketcalc_db::DbConfig;
///
/// let config = DbConfig::new("/path/to/marketcalc.db")
///     .max_connections(2)
///     .min_connections(1);
/// assert_eq!(config.max_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 2 (one front end, occasional health checks)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// The file and its parent directory are created if missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 2,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
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

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1, // Each connection would see its own database
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }

    /// Checks whether this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()));
        }

        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DbError::ConnectionFailed(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file (and directory) if it doesn't exist
    /// 2. Configures SQLite: WAL for files, NORMAL synchronous, foreign keys
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = config.connect_options()?.foreign_keys(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Reports how many embedded migrations have been applied.
    pub async fn migration_status(&self) -> DbResult<migrations::MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the preference repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let theme = db.preferences().get("theme").await?;
    /// ```
    pub fn preferences(&self) -> PreferenceRepository {
        PreferenceRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_migration_status_after_connect() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let status = db.migration_status().await.unwrap();
        assert!(status.is_up_to_date());

        let fresh = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        assert_eq!(fresh.migration_status().await.unwrap().applied, 0);
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("marketcalc.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(db.health_check().await);
        assert!(path.exists());
        db.close().await;
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}
