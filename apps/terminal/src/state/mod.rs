//! # State Module
//!
//! Startup state for the terminal front end.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CliArgs + env ──► AppConfig ──► open_store ──► Box<dyn KeyValueStore> │
//! │                                      │                                  │
//! │                          ┌───────────┴────────────┐                     │
//! │                          ▼                        ▼                     │
//! │                    SqliteStore               MemoryStore                │
//! │                 (marketcalc-db)          (--ephemeral / fallback)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bill and form state live in `marketcalc_core::session::AppContext`.

mod config;
mod store;

pub use config::{AppConfig, CliArgs, DATABASE_FILE, DEFAULT_LOG_FILTER};
pub use store::{open_store, SqliteStore};
