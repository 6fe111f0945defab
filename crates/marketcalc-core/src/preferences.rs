//! # Preferences
//!
//! Theme and currency, held in memory and mirrored to a key-value store.
//!
//! ## Persistence Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup:  store.get("theme")    ──► Theme::from_persisted ──► theme   │
//! │            store.get("currency") ──► Currency::find        ──► currency│
//! │                 │                                                       │
//! │                 └── absent / unrecognized / error ──► default           │
//! │                                                                         │
//! │  change:   memory updated first ──► store.set(key, value)              │
//! │                                          │                              │
//! │                                          └── error ──► warn!, ignored  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The in-memory value is authoritative for the rest of the session; the
//! store only matters at the next startup.

use std::collections::HashMap;

use crate::currency::Currency;
use crate::error::{CoreError, CoreResult, StoreError};
use crate::types::Theme;

/// Key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";

/// Key holding a catalog currency code.
pub const CURRENCY_KEY: &str = "currency";

// =============================================================================
// Key-Value Store
// =============================================================================

/// String key-value persistence.
///
/// Implemented in memory here and over SQLite in the terminal app.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// A [`KeyValueStore`] that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from existing entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Preferences Store
// =============================================================================

/// The user's display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub currency: &'static Currency,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: Theme::default(),
            currency: Currency::default_entry(),
        }
    }
}

/// Preferences plus the store they are written to.
#[derive(Debug)]
pub struct PreferencesStore<S> {
    current: Preferences,
    store: S,
}

impl<S: KeyValueStore> PreferencesStore<S> {
    /// Reads both keys from `store`. Never fails: anything missing,
    /// unreadable or unrecognized falls back to the default.
    pub fn load(store: S) -> Self {
        let theme = read_key(&store, THEME_KEY)
            .and_then(|value| {
                let theme = Theme::from_persisted(&value);
                if theme.is_none() {
                    tracing::debug!(value = %value, "Ignoring unrecognized persisted theme");
                }
                theme
            })
            .unwrap_or_default();

        let currency = read_key(&store, CURRENCY_KEY)
            .and_then(|value| {
                let currency = Currency::find(&value);
                if currency.is_none() {
                    tracing::debug!(value = %value, "Ignoring unrecognized persisted currency");
                }
                currency
            })
            .unwrap_or_else(Currency::default_entry);

        tracing::debug!(theme = %theme, currency = currency.code, "Preferences loaded");

        PreferencesStore {
            current: Preferences { theme, currency },
            store,
        }
    }

    pub fn current(&self) -> Preferences {
        self.current
    }

    pub fn theme(&self) -> Theme {
        self.current.theme
    }

    pub fn currency(&self) -> &'static Currency {
        self.current.currency
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.current.theme = theme;
        self.write(THEME_KEY, theme.as_str());
    }

    /// Flips light and dark.
    ///
    /// ## Returns
    /// The new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.current.theme.toggled();
        self.set_theme(theme);
        theme
    }

    /// Selects a catalog currency by code (case-insensitive).
    ///
    /// ## Errors
    /// [`CoreError::UnknownCurrency`] if `code` is not in the catalog;
    /// nothing changes.
    pub fn set_currency(&mut self, code: &str) -> CoreResult<&'static Currency> {
        let currency =
            Currency::find(code).ok_or_else(|| CoreError::UnknownCurrency(code.trim().to_string()))?;

        self.current.currency = currency;
        self.write(CURRENCY_KEY, currency.code);
        Ok(currency)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key = key, error = %e, "Failed to persist preference");
        }
    }
}

fn read_key<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = key, error = %e, "Failed to read preference, using default");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
