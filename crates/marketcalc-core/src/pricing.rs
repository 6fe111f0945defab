//! # Pricing Calculator
//!
//! Converts a price per base unit and a measured quantity into a line price.
//!
//! ## Algorithm
//! ```text
//! base price: ₹100 per kg        quantity: 400 gram
//!        │                              │
//!        │          measured_per_base(kg, gram) = 1000
//!        │                              │
//!        └──────► 100 × 400 / 1000 = 40 ◄┘
//! ```
//!
//! This is the only place quantities are converted between units. The
//! live preview and the committed line price both come from
//! [`compute_weighed_price`].

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::units::{BaseUnit, MeasuredUnit};

/// Expresses `quantity` (in `measured` units) as a number of `base` units.
///
/// ## Example
/// ```rust
/// use marketcalc_core::pricing::quantity_in_base_units;
/// use marketcalc_core::units::{BaseUnit, MeasuredUnit};
/// use rust_decimal::Decimal;
///
/// let dozens = quantity_in_base_units(Decimal::from(6), BaseUnit::Dozen, MeasuredUnit::Piece).unwrap();
/// assert_eq!(dozens, Decimal::new(5, 1)); // half a dozen
/// ```
pub fn quantity_in_base_units(
    quantity: Decimal,
    base: BaseUnit,
    measured: MeasuredUnit,
) -> CoreResult<Decimal> {
    let per_base = base
        .measured_per_base(measured)
        .ok_or(CoreError::UnitMismatch { base, measured })?;

    quantity
        .checked_div(Decimal::from(per_base))
        .ok_or(CoreError::AmountOverflow)
}

/// Computes the exact price of a weighed item.
///
/// `price = base_price × quantity / measured_per_base`
///
/// Multiplication happens before division so that exact results such as
/// `200 × 6 / 12 = 100` carry no intermediate rounding.
///
/// ## Errors
/// - [`ValidationError::MustBePositive`] for a zero or negative input
/// - [`CoreError::UnitMismatch`] when `measured` is not offered for `base`
/// - [`CoreError::AmountOverflow`] for amounts beyond decimal range
///
/// ## Example
/// ```rust
/// use marketcalc_core::pricing::compute_weighed_price;
/// use marketcalc_core::units::{BaseUnit, MeasuredUnit};
/// use rust_decimal::Decimal;
///
/// let price = compute_weighed_price(
///     Decimal::from(100),
///     Decimal::from(400),
///     BaseUnit::Kg,
///     MeasuredUnit::Gram,
/// )
/// .unwrap();
/// assert_eq!(price, Decimal::from(40));
/// ```
pub fn compute_weighed_price(
    base_price: Decimal,
    quantity: Decimal,
    base: BaseUnit,
    measured: MeasuredUnit,
) -> CoreResult<Decimal> {
    ensure_positive(base_price, "base price")?;
    ensure_positive(quantity, "quantity")?;

    let per_base = base
        .measured_per_base(measured)
        .ok_or(CoreError::UnitMismatch { base, measured })?;

    base_price
        .checked_mul(quantity)
        .and_then(|amount| amount.checked_div(Decimal::from(per_base)))
        .ok_or(CoreError::AmountOverflow)
}

/// Computes a weighed item's price rounded to a billable amount.
///
/// ## Errors
/// As [`compute_weighed_price`], plus the per-line checks of
/// [`Money::line_price`].
pub fn weighed_line_price(
    base_price: Decimal,
    quantity: Decimal,
    base: BaseUnit,
    measured: MeasuredUnit,
) -> CoreResult<Money> {
    let exact = compute_weighed_price(base_price, quantity, base, measured)?;
    Money::line_price(exact, "calculated price")
}

fn ensure_positive(value: Decimal, field: &str) -> CoreResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
