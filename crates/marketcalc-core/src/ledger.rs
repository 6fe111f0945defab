//! # Bill Ledger
//!
//! The running bill: an ordered list of priced line items.
//!
//! ## Ledger Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add_item(new) ──────► items.push(LineItem { id: next_id, .. })        │
//! │                        next_id += 1                                     │
//! │                                                                         │
//! │  remove_item(id) ────► items.retain(|i| i.id != id)                    │
//! │                                                                         │
//! │  reset() ────────────► items.clear()   (next_id keeps counting)        │
//! │                                                                         │
//! │  total() ────────────► Σ items[i].price   (never cached)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items stay in insertion order; nothing is merged or deduplicated
//! - The total always fits in [`Money`]: a line that would overflow it is
//!   refused
//! - An id is handed out once per session, so a deleted or reset id can
//!   never point at a different item later

use chrono::Utc;
use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ItemId, LineItem, NewLineItem};

/// First id handed out by a fresh bill.
const FIRST_ITEM_ID: u64 = 1;

/// The current bill.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    items: Vec<LineItem>,
    next_id: u64,
}

/// Item count and total, for headers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub item_count: usize,
    pub total: Money,
}

impl Bill {
    /// Creates an empty bill.
    pub fn new() -> Self {
        Bill {
            items: Vec::new(),
            next_id: FIRST_ITEM_ID,
        }
    }

    /// Appends a line and assigns its id.
    ///
    /// ## Returns
    /// The stored line, including its id.
    ///
    /// ## Errors
    /// [`CoreError::AmountOverflow`] if the new total would not fit; the
    /// bill is unchanged and no id is used up.
    pub fn add_item(&mut self, new_item: NewLineItem) -> CoreResult<&LineItem> {
        if self.total().checked_add(new_item.price).is_none() {
            tracing::debug!(price = %new_item.price, "Line refused, total would overflow");
            return Err(CoreError::AmountOverflow);
        }

        let id = ItemId(self.next_id);
        self.next_id += 1;

        self.items.push(LineItem {
            id,
            name: new_item.name,
            details: new_item.details,
            price: new_item.price,
            added_at: Utc::now(),
        });

        tracing::debug!(item_id = %id, "Line item added");

        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the line with `id`, if present.
    ///
    /// Removing an unknown id is a no-op and returns `None`.
    pub fn remove_item(&mut self, id: ItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Empties the bill. Ids already handed out are not reused.
    pub fn reset(&mut self) {
        self.items.clear();
    }

    /// Sum of every line price, computed on each call.
    pub fn total(&self) -> Money {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> BillSummary {
        BillSummary {
            item_count: self.items.len(),
            total: self.total(),
        }
    }
}

impl Default for Bill {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str, cents: i64) -> NewLineItem {
        NewLineItem {
            name: name.to_string(),
            details: "MRP".to_string(),
            price: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_new_bill_is_empty() {
        let bill = Bill::new();
        assert!(bill.is_empty());
        assert_eq!(bill.len(), 0);
        assert_eq!(bill.total(), Money::zero());
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut bill = Bill::new();
        let first = bill.add_item(new_item("Milk", 2500)).unwrap().id;
        let second = bill.add_item(new_item("Bread", 4000)).unwrap().id;

        assert_eq!(first, ItemId(1));
        assert_eq!(second, ItemId(2));
        assert_eq!(bill.items()[0].name, "Milk");
        assert_eq!(bill.items()[1].name, "Bread");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut bill = Bill::new();
        bill.add_item(new_item("Milk", 2500)).unwrap();
        bill.add_item(new_item("Milk", 2500)).unwrap();
        assert_eq!(bill.len(), 2);
        assert_eq!(bill.total().cents(), 5000);
    }

    #[test]
    fn test_total_tracks_adds_and_removes() {
        let mut bill = Bill::new();
        let prices = [4000, 1250, 99, 100000, 1];
        let mut ids = Vec::new();
        for (i, cents) in prices.iter().enumerate() {
            ids.push(bill.add_item(new_item(&format!("item {i}"), *cents)).unwrap().id);
            let expected: i64 = prices[..=i].iter().sum();
            assert_eq!(bill.total().cents(), expected);
        }

        bill.remove_item(ids[1]);
        bill.remove_item(ids[3]);
        assert_eq!(bill.total().cents(), 4000 + 99 + 1);

        let summed: Money = bill.items().iter().map(|i| i.price).sum();
        assert_eq!(bill.total(), summed);
    }

    #[test]
    fn test_add_then_remove_restores_items() {
        let mut bill = Bill::new();
        bill.add_item(new_item("Milk", 2500)).unwrap();
        let before = bill.items().to_vec();

        let id = bill.add_item(new_item("Eggs", 600)).unwrap().id;
        let removed = bill.remove_item(id).unwrap();

        assert_eq!(removed.name, "Eggs");
        assert_eq!(bill.items(), before.as_slice());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut bill = Bill::new();
        bill.add_item(new_item("Milk", 2500)).unwrap();
        assert!(bill.remove_item(ItemId(99)).is_none());
        assert_eq!(bill.len(), 1);
    }

    #[test]
    fn test_reset_empties_and_keeps_counting() {
        let mut bill = Bill::new();
        bill.add_item(new_item("Milk", 2500)).unwrap();
        bill.add_item(new_item("Bread", 4000)).unwrap();

        bill.reset();
        assert!(bill.is_empty());
        assert_eq!(bill.total(), Money::zero());

        let id = bill.add_item(new_item("Eggs", 600)).unwrap().id;
        assert_eq!(id, ItemId(3));
    }

    #[test]
    fn test_get_and_summary() {
        let mut bill = Bill::new();
        let id = bill.add_item(new_item("Milk", 2500)).unwrap().id;
        assert_eq!(bill.get(id).unwrap().name, "Milk");
        assert!(bill.get(ItemId(42)).is_none());

        let summary = bill.summary();
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.total.cents(), 2500);
    }

    #[test]
    fn test_line_that_would_overflow_total_is_refused() {
        let mut bill = Bill::new();
        bill.add_item(new_item("Gold", i64::MAX - 10)).unwrap();

        let err = bill.add_item(new_item("Gold", 11)).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));
        assert_eq!(bill.len(), 1);
        assert_eq!(bill.total().cents(), i64::MAX - 10);

        let id = bill.add_item(new_item("Tip", 10)).unwrap().id;
        assert_eq!(id, ItemId(2));
        assert_eq!(bill.total().cents(), i64::MAX);
    }
}
