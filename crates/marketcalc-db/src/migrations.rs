//! # Database Migrations
//!
//! Embedded SQL migrations for MarketCalc.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Startup                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Check _sqlx_migrations table (create if missing)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs applied                                │
//! │       │                                                                 │
//! │       └── 001_preferences.sql   ⬜ (first run only)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record in _sqlx_migrations           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent, and each migration runs in its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Migration counts for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migrations embedded in this build.
    pub total: usize,
    /// Migrations recorded as applied in the database.
    pub applied: usize,
}

impl MigrationStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.applied >= self.total
    }
}

/// Returns how many embedded migrations have been applied.
///
/// A database that was never migrated reports zero applied.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let total = MIGRATOR.migrations.len();

    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    let applied: i64 = if table_exists > 0 {
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    } else {
        0
    };

    Ok(MigrationStatus {
        total,
        applied: usize::try_from(applied).unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_status_before_and_after_migrating() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let before = migration_status(db.pool()).await.unwrap();
        assert_eq!(before.applied, 0);
        assert!(before.total >= 1);
        assert!(!before.is_up_to_date());

        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();

        let after = migration_status(db.pool()).await.unwrap();
        assert_eq!(after.applied, after.total);
        assert!(after.is_up_to_date());
    }
}
