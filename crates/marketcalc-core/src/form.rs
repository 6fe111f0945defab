//! # Entry Forms
//!
//! Raw-text state behind the two "add item" dialogs.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   edit fields ──► validate() ──► Ok(entry) ──► entry.to_new_line_item  │
//! │        ▲               │                              │                 │
//! │        │               └── Err(ValidationError)       ▼                 │
//! │        │                   submit disabled       Bill::add_item         │
//! │        │                                              │                 │
//! │        └────────────── reset() ◄──────────────────────┘                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Text is kept exactly as typed; nothing is parsed until `validate()`.
//! Preview and submit go through the same `validate()` call, so a form
//! that shows a calculated price is always one that can be added.

use rust_decimal::Decimal;
use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::weighed_line_price;
use crate::types::NewLineItem;
use crate::units::{BaseUnit, MeasuredUnit};
use crate::validation::{
    format_amount, parse_amount, validate_optional_name, validate_required_name, ValidationResult,
};
use crate::{DEFAULT_ITEM_NAME, MRP_DETAILS};

// =============================================================================
// Weighed Form
// =============================================================================

/// Form for an item priced per unit and measured by quantity.
///
/// The unit fields are private so that the measured unit can never fall
/// outside the set offered for the base unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WeighedForm {
    /// Optional; blank becomes [`DEFAULT_ITEM_NAME`].
    pub item_name: String,

    /// Price per base unit, as typed.
    pub base_price: String,

    /// Quantity in the measured unit, as typed.
    pub quantity: String,

    base_unit: BaseUnit,
    measured_unit: MeasuredUnit,
}

/// A weighed form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeighedEntry {
    pub name: String,
    pub base_price: Decimal,
    pub base_unit: BaseUnit,
    pub quantity: Decimal,
    pub measured_unit: MeasuredUnit,
}

impl WeighedForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_unit(&self) -> BaseUnit {
        self.base_unit
    }

    pub fn measured_unit(&self) -> MeasuredUnit {
        self.measured_unit
    }

    /// Selects a base unit. The measured unit goes back to the first
    /// option offered for it, even when the base unit did not change.
    pub fn set_base_unit(&mut self, unit: BaseUnit) {
        self.base_unit = unit;
        self.measured_unit = unit.default_measured_unit();
    }

    /// Selects a measured unit.
    ///
    /// ## Errors
    /// [`ValidationError::NotAllowed`] if `unit` is not offered for the
    /// current base unit; the selection is left unchanged.
    pub fn set_measured_unit(&mut self, unit: MeasuredUnit) -> ValidationResult<()> {
        if !self.base_unit.accepts(unit) {
            return Err(ValidationError::NotAllowed {
                field: "measured unit".to_string(),
                allowed: self
                    .base_unit
                    .measured_units()
                    .iter()
                    .map(|u| u.to_string())
                    .collect(),
            });
        }

        self.measured_unit = unit;
        Ok(())
    }

    /// Checks every field, reporting the first problem found.
    pub fn validate(&self) -> ValidationResult<WeighedEntry> {
        let name = validate_optional_name(&self.item_name, DEFAULT_ITEM_NAME)?;
        let base_price = parse_amount(&self.base_price).require("base price")?;
        let quantity = parse_amount(&self.quantity).require("quantity")?;

        Ok(WeighedEntry {
            name,
            base_price,
            base_unit: self.base_unit,
            quantity,
            measured_unit: self.measured_unit,
        })
    }

    /// Live "Calculated Price", present only when the form can be added.
    pub fn preview(&self) -> Option<Money> {
        self.validate().ok()?.price().ok()
    }

    pub fn is_submittable(&self) -> bool {
        self.preview().is_some()
    }

    /// Back to defaults: empty text, kg, gram.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl WeighedEntry {
    /// Line price, rounded to minor units.
    pub fn price(&self) -> CoreResult<Money> {
        weighed_line_price(
            self.base_price,
            self.quantity,
            self.base_unit,
            self.measured_unit,
        )
    }

    /// `"400gram @ ₹100/kg"`
    pub fn details(&self, currency_symbol: &str) -> String {
        format!(
            "{}{} @ {}{}/{}",
            format_amount(self.quantity),
            self.measured_unit,
            currency_symbol,
            format_amount(self.base_price),
            self.base_unit
        )
    }

    /// Prices the entry. `currency_symbol` is baked into the details text.
    pub fn to_new_line_item(&self, currency_symbol: &str) -> CoreResult<NewLineItem> {
        Ok(NewLineItem {
            name: self.name.clone(),
            details: self.details(currency_symbol),
            price: self.price()?,
        })
    }
}

// =============================================================================
// MRP Form
// =============================================================================

/// Form for an item with a printed, fixed price (MRP).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MrpForm {
    /// Required.
    pub item_name: String,

    /// Price, as typed.
    pub price: String,
}

/// An MRP form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrpEntry {
    pub name: String,
    pub price: Decimal,
}

impl MrpForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> ValidationResult<MrpEntry> {
        let name = validate_required_name(&self.item_name)?;
        let price = parse_amount(&self.price).require("price")?;

        Ok(MrpEntry { name, price })
    }

    pub fn is_submittable(&self) -> bool {
        self.validate()
            .ok()
            .is_some_and(|entry| entry.to_new_line_item().is_ok())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl MrpEntry {
    pub fn to_new_line_item(&self) -> CoreResult<NewLineItem> {
        Ok(NewLineItem {
            name: self.name.clone(),
            details: MRP_DETAILS.to_string(),
            price: Money::line_price(self.price, "price")?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn filled_weighed() -> WeighedForm {
        let mut form = WeighedForm::new();
        form.item_name = "Tomatoes".to_string();
        form.base_price = "100".to_string();
        form.quantity = "400".to_string();
        form
    }

    #[test]
    fn test_weighed_defaults() {
        let form = WeighedForm::new();
        assert_eq!(form.base_unit(), BaseUnit::Kg);
        assert_eq!(form.measured_unit(), MeasuredUnit::Gram);
        assert!(!form.is_submittable());
        assert_eq!(form.preview(), None);
    }

    #[test]
    fn test_set_base_unit_resets_measured_unit() {
        let mut form = WeighedForm::new();
        form.set_measured_unit(MeasuredUnit::Kg).unwrap();

        form.set_base_unit(BaseUnit::Litre);
        assert_eq!(form.measured_unit(), MeasuredUnit::Ml);

        form.set_base_unit(BaseUnit::Dozen);
        assert_eq!(form.measured_unit(), MeasuredUnit::Piece);
    }

    #[test]
    fn test_set_measured_unit_rejects_foreign_unit() {
        let mut form = WeighedForm::new();
        let err = form.set_measured_unit(MeasuredUnit::Ml).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
        assert_eq!(form.measured_unit(), MeasuredUnit::Gram);
    }

    #[test]
    fn test_weighed_preview_and_details() {
        let form = filled_weighed();
        assert_eq!(form.preview(), Some(Money::from_cents(4000)));

        let item = form.validate().unwrap().to_new_line_item("₹").unwrap();
        assert_eq!(item.name, "Tomatoes");
        assert_eq!(item.details, "400gram @ ₹100/kg");
        assert_eq!(item.price.cents(), 4000);
    }

    #[test]
    fn test_weighed_blank_name_defaults() {
        let mut form = filled_weighed();
        form.item_name = "   ".to_string();
        assert_eq!(form.validate().unwrap().name, DEFAULT_ITEM_NAME);
    }

    #[test]
    fn test_weighed_details_normalize_numbers() {
        let mut form = filled_weighed();
        form.base_price = "50.00".to_string();
        form.set_base_unit(BaseUnit::Litre);
        form.set_measured_unit(MeasuredUnit::Litre).unwrap();
        form.quantity = "2.50".to_string();

        let entry = form.validate().unwrap();
        assert_eq!(entry.details("$"), "2.5litre @ $50/litre");
        assert_eq!(entry.price().unwrap().cents(), 12500);
    }

    #[test]
    fn test_weighed_empty_quantity_not_submittable() {
        let mut form = filled_weighed();
        form.quantity.clear();

        assert!(!form.is_submittable());
        assert_eq!(form.preview(), None);
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::Required {
                field: "quantity".to_string()
            }
        );
    }

    #[test]
    fn test_weighed_zero_price_not_submittable() {
        let mut form = filled_weighed();
        form.base_price = "0".to_string();
        assert!(!form.is_submittable());
    }

    #[test]
    fn test_weighed_reset() {
        let mut form = filled_weighed();
        form.set_base_unit(BaseUnit::Dozen);
        form.reset();
        assert_eq!(form, WeighedForm::default());
    }

    #[test]
    fn test_mrp_requires_name() {
        let mut form = MrpForm::new();
        form.price = "25".to_string();
        assert!(!form.is_submittable());

        form.item_name = "  ".to_string();
        assert!(!form.is_submittable());

        form.item_name = "Milk".to_string();
        assert!(form.is_submittable());
    }

    #[test]
    fn test_mrp_line_item() {
        let form = MrpForm {
            item_name: " Biscuits ".to_string(),
            price: "12.345".to_string(),
        };
        let item = form.validate().unwrap().to_new_line_item().unwrap();
        assert_eq!(item.name, "Biscuits");
        assert_eq!(item.details, MRP_DETAILS);
        assert_eq!(item.price.cents(), 1235);
    }

    #[test]
    fn test_amounts_rounding_to_zero_not_submittable() {
        let form = MrpForm {
            item_name: "Sweets".to_string(),
            price: "0.001".to_string(),
        };
        assert!(form.validate().is_ok());
        assert!(!form.is_submittable());
        assert!(matches!(
            form.validate().unwrap().to_new_line_item(),
            Err(CoreError::Validation(ValidationError::TooSmall { .. }))
        ));

        // 1 gram at 1 per kg
        let mut weighed = filled_weighed();
        weighed.base_price = "1".to_string();
        weighed.quantity = "1".to_string();
        assert_eq!(weighed.preview(), None);
        assert!(!weighed.is_submittable());
    }

    #[test]
    fn test_mrp_price_above_line_limit_not_submittable() {
        let form = MrpForm {
            item_name: "Gold".to_string(),
            price: "50000000000000000".to_string(),
        };
        assert!(!form.is_submittable());
        assert!(matches!(
            form.validate().unwrap().to_new_line_item(),
            Err(CoreError::AmountOverflow)
        ));
    }

    #[test]
    fn test_mrp_rejects_non_numeric_price() {
        let form = MrpForm {
            item_name: "Milk".to_string(),
            price: "twenty".to_string(),
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
