//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► StoreError (preference writes, logged and dropped)          │
//! │       │                                                                 │
//! │       └──► AppError (startup failures shown in the terminal)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - A plain INSERT on an existing preference key
    ///   (`PreferenceRepository::set` upserts and never hits this)
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Invalid SQL in migration
    /// - The database was migrated by a newer build
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether retrying later could succeed (the file or pool was busy or
    /// missing, rather than the query being wrong).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_) | DbError::PoolExhausted)
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → UniqueViolation or QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(DbError::from(sqlx::Error::PoolClosed).is_unavailable());
        assert!(!DbError::QueryFailed("syntax".to_string()).is_unavailable());
    }

    #[test]
    fn test_row_not_found_maps() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "Record not found: unknown");
    }
}
