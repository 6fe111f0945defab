//! # Preference Store Adapters
//!
//! Bridges the synchronous [`KeyValueStore`] the core expects to the async
//! SQLite repository.
//!
//! ```text
//! PreferencesStore ──get/set──► SqliteStore ──block_on──► PreferenceRepository
//!                                   │
//!                                   └── owns a current-thread tokio runtime
//! ```

use std::path::Path;

use marketcalc_core::preferences::{KeyValueStore, MemoryStore};
use marketcalc_core::StoreError;
use marketcalc_db::{Database, DbConfig, DbError};
use tokio::runtime::{Builder, Runtime};
use tracing::{info, warn};

use crate::error::AppResult;
use crate::state::AppConfig;

/// SQLite-backed preferences.
pub struct SqliteStore {
    runtime: Runtime,
    db: Database,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and migrates it.
    pub fn open(path: &Path) -> AppResult<Self> {
        SqliteStore::connect(DbConfig::new(path))
    }

    /// Connects with an explicit database configuration.
    pub fn connect(config: DbConfig) -> AppResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let db = runtime.block_on(Database::new(config))?;

        Ok(SqliteStore { runtime, db })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.runtime
            .block_on(self.db.preferences().get(key))
            .map_err(to_store_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.runtime
            .block_on(self.db.preferences().set(key, value))
            .map_err(to_store_error)
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        self.runtime.block_on(self.db.close());
    }
}

fn to_store_error(err: DbError) -> StoreError {
    if err.is_unavailable() {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Failed(err.to_string())
    }
}

/// Opens the store selected by `config`.
///
/// If the database cannot be opened the session still starts, on an
/// in-memory store, and preferences simply are not kept.
pub fn open_store(config: &AppConfig) -> Box<dyn KeyValueStore> {
    if config.ephemeral {
        info!("Using in-memory preferences");
        return Box::new(MemoryStore::new());
    }

    let opened = config
        .resolve_database_path()
        .and_then(|path| SqliteStore::open(&path));

    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Preferences will not be saved this session");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_store_round_trip() {
        let mut store = SqliteStore::connect(DbConfig::in_memory()).unwrap();
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_sqlite_store_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marketcalc.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set("currency", "AUD").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("currency").unwrap().as_deref(), Some("AUD"));
    }

    #[test]
    fn test_closed_pool_reports_store_error() {
        let store = SqliteStore::connect(DbConfig::in_memory()).unwrap();
        store.runtime.block_on(store.db.close());
        assert!(matches!(
            store.get("theme"),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn test_ephemeral_config_uses_memory() {
        let config = AppConfig {
            ephemeral: true,
            ..AppConfig::default()
        };
        let mut store = open_store(&config);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_unopenable_database_falls_back_to_memory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().join("marketcalc.db");
        assert!(SqliteStore::open(&path).is_err());

        let config = AppConfig {
            database_path: Some(path.clone()),
            ..AppConfig::default()
        };
        let mut store = open_store(&config);
        store.set("currency", "GBP").unwrap();
        assert_eq!(store.get("currency").unwrap().as_deref(), Some("GBP"));
        assert!(!path.exists());
    }
}
