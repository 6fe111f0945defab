//! # marketcalc-core: Pure Business Logic for MarketCalc
//!
//! This crate is the **heart** of MarketCalc. It contains the bill ledger,
//! the unit-price calculator and the preference rules as plain Rust with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MarketCalc Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Rendering Surface (terminal)                    │   │
//! │  │    Bill view ──► Weighed form ──► MRP form ──► Reset dialog     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intents / Snapshot                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ marketcalc-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  session  │  │  ledger   │  │  pricing  │  │preferences│  │   │
//! │  │   │AppContext │  │   Bill    │  │  units    │  │  theme    │  │   │
//! │  │   │  forms    │  │ LineItem  │  │  money    │  │ currency  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └─────┬─────┘  │   │
//! │  │                                                       │        │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL                  │        │   │
//! │  └───────────────────────────────────────────────────────┼────────┘   │
//! │                                                          │ KeyValueStore
//! │  ┌───────────────────────────────────────────────────────▼────────┐   │
//! │  │                 marketcalc-db (SQLite key-value)               │   │
//! │  └────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer minor units
//! - [`units`] - Base and measured units, conversion factors
//! - [`pricing`] - Weighed item price calculation
//! - [`currency`] - Fixed currency catalog
//! - [`validation`] - Free-text amount parsing and field rules
//! - [`form`] - Weighed and MRP form state
//! - [`ledger`] - The running bill
//! - [`preferences`] - Theme and currency, mirrored to a key-value store
//! - [`session`] - Application context tying it all together
//! - [`types`] - Shared domain types
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use marketcalc_core::preferences::MemoryStore;
//! use marketcalc_core::session::AppContext;
//! use marketcalc_core::units::{BaseUnit, MeasuredUnit};
//!
//! let mut ctx = AppContext::new(MemoryStore::new());
//!
//! let form = ctx.weighed_form_mut();
//! form.item_name = "Tomatoes".to_string();
//! form.base_price = "100".to_string();
//! form.set_base_unit(BaseUnit::Kg);
//! form.quantity = "400".to_string();
//! form.set_measured_unit(MeasuredUnit::Gram).unwrap();
//!
//! let item = ctx.submit_weighed().unwrap();
//! assert_eq!(item.details, "400gram @ ₹100/kg");
//! assert_eq!(ctx.bill().total().cents(), 4000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod form;
pub mod ledger;
pub mod money;
pub mod preferences;
pub mod pricing;
pub mod session;
pub mod types;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use currency::Currency;
pub use error::{CoreError, CoreResult, StoreError, ValidationError};
pub use ledger::Bill;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name given to a weighed item when the user leaves the name blank.
pub const DEFAULT_ITEM_NAME: &str = "Item";

/// Details text recorded for fixed-price items.
pub const MRP_DETAILS: &str = "MRP";

/// Longest item name accepted, in characters.
pub const MAX_ITEM_NAME_LEN: usize = 200;
