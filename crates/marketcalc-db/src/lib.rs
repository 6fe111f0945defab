//! # marketcalc-db: Database Layer for MarketCalc
//!
//! This crate stores MarketCalc's display preferences in a local SQLite
//! file, using sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      MarketCalc Preference Flow                         │
//! │                                                                         │
//! │  PreferencesStore (marketcalc-core)                                    │
//! │       │  KeyValueStore::get / set                                      │
//! │       ▼                                                                 │
//! │  SqliteStore (terminal app, blocks on a current-thread runtime)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  marketcalc-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │    Repositories    │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ PreferenceRepo     │  │ (embedded) │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/marketcalc.db                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use marketcalc_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/marketcalc.db")).await?;
//!
//! db.preferences().set("currency", "EUR").await?;
//! let currency = db.preferences().get("currency").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::preference::{PreferenceRecord, PreferenceRepository};
