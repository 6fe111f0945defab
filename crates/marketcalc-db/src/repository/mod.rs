//! # Repository Module
//!
//! Database repository implementations for MarketCalc.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SqliteStore (terminal app)                                            │
//! │       │                                                                 │
//! │       │  db.preferences().set("theme", "dark")                          │
//! │       ▼                                                                 │
//! │  PreferenceRepository                                                  │
//! │  ├── get(&self, key)                                                   │
//! │  ├── set(&self, key, value)      (upsert)                              │
//! │  ├── delete(&self, key)                                                │
//! │  ├── all(&self)                                                        │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PreferenceRepository`](preference::PreferenceRepository) - Key-value preferences

pub mod preference;
