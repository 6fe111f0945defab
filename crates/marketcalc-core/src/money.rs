//! # Money Module
//!
//! Provides the `Money` type for handling bill amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A running bill adds many line prices. Float drift would make the       │
//! │  displayed total disagree with the sum of displayed line prices.        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    Each line price is rounded ONCE, when the line is created.           │
//! │    The total is an exact integer sum of those prices.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Intermediate pricing math (unit conversion) runs on exact
//! [`Decimal`] values; only the final line price becomes `Money`.
//!
//! ## Usage
//! ```rust
//! use marketcalc_core::money::Money;
//!
//! let price = Money::from_cents(4000); // 40.00
//! let total = price.checked_add(Money::from_cents(1250)).unwrap();
//! assert_eq!(total.to_string(), "52.50");
//! assert_eq!(total.format_with_symbol("₹"), "₹52.50");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Minor units per major unit. Every catalog currency is displayed with
/// two decimals.
const MINOR_PER_MAJOR: i64 = 100;

/// Largest price one line can carry: 1,000,000,000.00.
pub const MAX_LINE_PRICE: Money = Money(100_000_000_000);

// =============================================================================
// Money Type
// =============================================================================

/// Represents an amount in minor units (hundredths of the selected currency).
///
/// ## Design Decisions
/// - **i64 minor units**: line prices are never negative and at most
///   [`MAX_LINE_PRICE`]; the ledger refuses a line whose addition would
///   not fit, so a bill total always fits too
/// - **Not currency-tagged**: switching currency only changes the symbol
///   shown next to the same number
///
/// ## Where Money is Used
/// ```text
/// pricing::compute_weighed_price ──► Money::line_price ──► LineItem.price
///                                                                 │
/// MRP price input ──────────────────► Money::line_price ──────────┤
///                                                                 ▼
///                                               Bill::total() = Σ prices
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use marketcalc_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an exact decimal amount to the nearest minor unit.
    ///
    /// Midpoints round away from zero, so `40.005` becomes `40.01`.
    ///
    /// ## Example
    /// ```rust
    /// use marketcalc_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_decimal(Decimal::new(400050, 4)).unwrap(); // 40.0050
    /// assert_eq!(price.cents(), 4001);
    /// ```
    ///
    /// ## Errors
    /// [`CoreError::AmountOverflow`] when the amount does not fit in `i64`
    /// minor units.
    pub fn from_decimal(amount: Decimal) -> CoreResult<Self> {
        let cents = amount
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .ok_or(CoreError::AmountOverflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        cents
            .to_i64()
            .map(Money::from_cents)
            .ok_or(CoreError::AmountOverflow)
    }

    /// Rounds `amount` and checks that it can be billed as one line.
    ///
    /// ## Errors
    /// - [`ValidationError::TooSmall`] naming `field` when the amount
    ///   rounds to zero
    /// - [`CoreError::AmountOverflow`] above [`MAX_LINE_PRICE`]
    pub fn line_price(amount: Decimal, field: &str) -> CoreResult<Self> {
        let money = Money::from_decimal(amount)?;

        if money > MAX_LINE_PRICE {
            return Err(CoreError::AmountOverflow);
        }
        if money.0 <= 0 {
            return Err(ValidationError::TooSmall {
                field: field.to_string(),
            }
            .into());
        }

        Ok(money)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the amount with a currency symbol in front, two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use marketcalc_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(4000).format_with_symbol("$"), "$40.00");
    /// assert_eq!(Money::from_cents(-550).format_with_symbol("€"), "-€5.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let minor = MINOR_PER_MAJOR as u64;
        format!("{}{}{}.{:02}", sign, symbol, abs / minor, abs % minor)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(""))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates instead of wrapping.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| Money(acc.0.saturating_add(m.0)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(i64::MIN)), "-92233720368547758.08");
    }

    #[test]
    fn test_format_with_multichar_symbol() {
        assert_eq!(Money::from_cents(123456).format_with_symbol("A$"), "A$1234.56");
        assert_eq!(Money::from_cents(5).format_with_symbol("₹"), "₹0.05");
    }

    #[test]
    fn test_from_decimal_rounding() {
        // 40.004 → 40.00, 40.005 → 40.01, 33.333... → 33.33
        assert_eq!(Money::from_decimal(Decimal::new(40004, 3)).unwrap().cents(), 4000);
        assert_eq!(Money::from_decimal(Decimal::new(40005, 3)).unwrap().cents(), 4001);
        let third = Decimal::from(100) / Decimal::from(3);
        assert_eq!(Money::from_decimal(third).unwrap().cents(), 3333);
    }

    #[test]
    fn test_from_decimal_overflow() {
        let err = Money::from_decimal(Decimal::MAX).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));
    }

    #[test]
    fn test_line_price_bounds() {
        let max = Decimal::from(1_000_000_000);
        assert_eq!(Money::line_price(max, "price").unwrap(), MAX_LINE_PRICE);

        let err = Money::line_price(max + Decimal::new(1, 2), "price").unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));

        let err = Money::line_price("50000000000000000".parse().unwrap(), "price").unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));
    }

    #[test]
    fn test_line_price_rejects_amounts_rounding_to_zero() {
        let err = Money::line_price(Decimal::new(1, 3), "price").unwrap_err(); // 0.001
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooSmall { .. })
        ));

        // 0.005 rounds up to one minor unit
        assert_eq!(Money::line_price(Decimal::new(5, 3), "price").unwrap().cents(), 1);
    }

    #[test]
    fn test_checked_add_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);

        let total: Money = [a, b, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total.cents(), 1501);
    }

    #[test]
    fn test_zero_is_default() {
        assert_eq!(Money::default(), Money::zero());
        assert_eq!(Money::zero().cents(), 0);
    }
}
