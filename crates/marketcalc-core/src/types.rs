//! # Domain Types
//!
//! Core domain types shared across MarketCalc.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │   NewLineItem   │   │     Theme       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  name           │   │  Light          │       │
//! │  │  name           │   │  details        │   │  Dark           │       │
//! │  │  details        │   │  price          │   └─────────────────┘       │
//! │  │  price (Money)  │   └────────┬────────┘                              │
//! │  │  added_at       │            │ Bill::add_item assigns id             │
//! │  └─────────────────┘◄───────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Item Identifier
// =============================================================================

/// Identifier of a line item within one bill session.
///
/// Assigned by the ledger from a sequential counter; never reused within a
/// session, not even after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Returns the raw counter value.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Accepts `"3"` and `"#3"`.
impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);

        digits
            .parse::<u64>()
            .map(ItemId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "item id".to_string(),
                reason: "must be an item number like 3".to_string(),
            })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A committed line on the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within the session.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// How the price was derived, e.g. "400gram @ ₹100/kg" or "MRP".
    pub details: String,

    /// Line price, never negative.
    pub price: Money,

    /// When the line was added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

/// A line item that has been priced but not yet added to a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub name: String,
    pub details: String,
    pub price: Money,
}

// =============================================================================
// Theme
// =============================================================================

/// Display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value written to the persistence store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Reads a persisted value. Anything unrecognized is `None`.
    pub fn from_persisted(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub const fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    #[inline]
    pub const fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_parse() {
        assert_eq!("3".parse::<ItemId>().unwrap(), ItemId(3));
        assert_eq!(" #12 ".parse::<ItemId>().unwrap(), ItemId(12));
        assert!("abc".parse::<ItemId>().is_err());
        assert!("-1".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_theme_default_and_toggle() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn test_theme_from_persisted() {
        assert_eq!(Theme::from_persisted("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_persisted("light"), Some(Theme::Light));
        assert_eq!(Theme::from_persisted("DARK"), None);
        assert_eq!(Theme::from_persisted("sepia"), None);
    }

    #[test]
    fn test_line_item_serializes_camel_case() {
        let item = LineItem {
            id: ItemId(1),
            name: "Milk".to_string(),
            details: "MRP".to_string(),
            price: Money::from_cents(2500),
            added_at: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["price"], 2500);
        assert!(json.get("addedAt").is_some());
    }
}
