//! # Preference Repository
//!
//! String key-value pairs in the `preferences` table.
//!
//! The repository stores whatever it is given; deciding which keys and
//! values mean something is left to the caller.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// One row of the `preferences` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PreferenceRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for preference operations.
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    pool: SqlitePool,
}

impl PreferenceRepository {
    /// Creates a new PreferenceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PreferenceRepository { pool }
    }

    /// Reads the value stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Key present
    /// * `Ok(None)` - Key never written or deleted
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM preferences WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, "Writing preference");

        sqlx::query(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes `key`.
    ///
    /// ## Returns
    /// Whether a row was removed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM preferences WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Every stored preference, ordered by key.
    pub async fn all(&self) -> DbResult<Vec<PreferenceRecord>> {
        let records = sqlx::query_as::<_, PreferenceRecord>(
            "SELECT key, value, updated_at FROM preferences ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Number of stored preferences.
    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM preferences")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    async fn memory_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let db = memory_db().await;
        assert_eq!(db.preferences().get("theme").await.unwrap(), None);
        assert_eq!(db.preferences().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let db = memory_db().await;
        let repo = db.preferences();

        repo.set("theme", "dark").await.unwrap();
        assert_eq!(repo.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let db = memory_db().await;
        let repo = db.preferences();

        repo.set("currency", "INR").await.unwrap();
        repo.set("currency", "EUR").await.unwrap();

        assert_eq!(repo.get("currency").await.unwrap().as_deref(), Some("EUR"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = memory_db().await;
        let repo = db.preferences();

        repo.set("theme", "light").await.unwrap();
        assert!(repo.delete("theme").await.unwrap());
        assert!(!repo.delete("theme").await.unwrap());
        assert_eq!(repo.get("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_all_is_ordered_by_key() {
        let db = memory_db().await;
        let repo = db.preferences();

        repo.set("theme", "dark").await.unwrap();
        repo.set("currency", "GBP").await.unwrap();

        let all = repo.all().await.unwrap();
        let keys: Vec<_> = all.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["currency", "theme"]);
        assert_eq!(all[0].value, "GBP");
    }

    #[tokio::test]
    async fn test_values_survive_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marketcalc.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.preferences().set("currency", "SGD").await.unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(
            reopened.preferences().get("currency").await.unwrap().as_deref(),
            Some("SGD")
        );
        reopened.close().await;
    }
}
