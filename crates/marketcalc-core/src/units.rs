//! # Units
//!
//! The units a price can be quoted in ([`BaseUnit`]) and the units a
//! purchase can be measured in ([`MeasuredUnit`]).
//!
//! ## Conversion Table
//! ```text
//! ┌──────────┬──────────────────────┬──────────────────────────────┐
//! │ base     │ measured             │ measured units per base unit │
//! ├──────────┼──────────────────────┼──────────────────────────────┤
//! │ kg       │ gram, kg             │ 1000, 1                      │
//! │ litre    │ ml, litre            │ 1000, 1                      │
//! │ quintal  │ gram, kg             │ 100000, 100                  │
//! │ dozen    │ piece                │ 12                           │
//! └──────────┴──────────────────────┴──────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Base Unit
// =============================================================================

/// The unit a base price is quoted in ("₹100 per kg").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    Kg,
    Litre,
    Quintal,
    Dozen,
}

impl BaseUnit {
    /// All base units in display order.
    pub const ALL: [BaseUnit; 4] = [
        BaseUnit::Kg,
        BaseUnit::Litre,
        BaseUnit::Quintal,
        BaseUnit::Dozen,
    ];

    /// Canonical lowercase name, as used in item details.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BaseUnit::Kg => "kg",
            BaseUnit::Litre => "litre",
            BaseUnit::Quintal => "quintal",
            BaseUnit::Dozen => "dozen",
        }
    }

    /// How many of the smallest measured sub-unit make one base unit.
    ///
    /// kg→1000 grams, litre→1000 ml, quintal→100000 grams, dozen→12 pieces.
    pub const fn divisor(&self) -> u32 {
        match self {
            BaseUnit::Kg => 1_000,
            BaseUnit::Litre => 1_000,
            BaseUnit::Quintal => 100_000,
            BaseUnit::Dozen => 12,
        }
    }

    /// Measured units that may be used with this base unit.
    ///
    /// The first entry is the default selected when the base unit changes.
    pub const fn measured_units(&self) -> &'static [MeasuredUnit] {
        match self {
            BaseUnit::Kg => &[MeasuredUnit::Gram, MeasuredUnit::Kg],
            BaseUnit::Litre => &[MeasuredUnit::Ml, MeasuredUnit::Litre],
            BaseUnit::Quintal => &[MeasuredUnit::Gram, MeasuredUnit::Kg],
            BaseUnit::Dozen => &[MeasuredUnit::Piece],
        }
    }

    /// The measured unit selected by default for this base unit.
    pub fn default_measured_unit(&self) -> MeasuredUnit {
        self.measured_units()[0]
    }

    /// Checks whether `measured` can be priced against this base unit.
    pub fn accepts(&self, measured: MeasuredUnit) -> bool {
        self.measured_units().contains(&measured)
    }

    /// Number of `measured` units in one base unit, or `None` when the
    /// pair is not convertible.
    ///
    /// ## Example
    /// ```rust
    /// use marketcalc_core::units::{BaseUnit, MeasuredUnit};
    ///
    /// assert_eq!(BaseUnit::Kg.measured_per_base(MeasuredUnit::Gram), Some(1000));
    /// assert_eq!(BaseUnit::Quintal.measured_per_base(MeasuredUnit::Kg), Some(100));
    /// assert_eq!(BaseUnit::Dozen.measured_per_base(MeasuredUnit::Gram), None);
    /// ```
    pub fn measured_per_base(&self, measured: MeasuredUnit) -> Option<u32> {
        if !self.accepts(measured) {
            return None;
        }

        if measured.is_sub_unit() {
            return Some(self.divisor());
        }

        // A whole unit measured against a larger base (kg against quintal).
        match (self, measured) {
            (BaseUnit::Quintal, MeasuredUnit::Kg) => Some(100),
            _ => Some(1),
        }
    }
}

impl Default for BaseUnit {
    fn default() -> Self {
        BaseUnit::Kg
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(BaseUnit::Kg),
            "litre" | "liter" | "l" | "litres" | "liters" => Ok(BaseUnit::Litre),
            "quintal" | "q" | "quintals" => Ok(BaseUnit::Quintal),
            "dozen" | "dz" | "dozens" => Ok(BaseUnit::Dozen),
            _ => Err(ValidationError::NotAllowed {
                field: "base unit".to_string(),
                allowed: BaseUnit::ALL.iter().map(|u| u.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Measured Unit
// =============================================================================

/// The unit a purchased quantity is entered in ("400 gram").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MeasuredUnit {
    Gram,
    Kg,
    Ml,
    Litre,
    Piece,
}

impl MeasuredUnit {
    /// All measured units in display order.
    pub const ALL: [MeasuredUnit; 5] = [
        MeasuredUnit::Gram,
        MeasuredUnit::Kg,
        MeasuredUnit::Ml,
        MeasuredUnit::Litre,
        MeasuredUnit::Piece,
    ];

    /// Canonical lowercase name, as used in item details.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MeasuredUnit::Gram => "gram",
            MeasuredUnit::Kg => "kg",
            MeasuredUnit::Ml => "ml",
            MeasuredUnit::Litre => "litre",
            MeasuredUnit::Piece => "piece",
        }
    }

    /// Sub-units are divided by the base unit's divisor before pricing.
    pub const fn is_sub_unit(&self) -> bool {
        matches!(
            self,
            MeasuredUnit::Gram | MeasuredUnit::Ml | MeasuredUnit::Piece
        )
    }
}

impl Default for MeasuredUnit {
    fn default() -> Self {
        BaseUnit::default().default_measured_unit()
    }
}

impl fmt::Display for MeasuredUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasuredUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gram" | "g" | "gm" | "grams" => Ok(MeasuredUnit::Gram),
            "kg" | "kilogram" | "kilograms" => Ok(MeasuredUnit::Kg),
            "ml" | "millilitre" | "milliliter" => Ok(MeasuredUnit::Ml),
            "litre" | "liter" | "l" | "litres" | "liters" => Ok(MeasuredUnit::Litre),
            "piece" | "pc" | "pcs" | "pieces" => Ok(MeasuredUnit::Piece),
            _ => Err(ValidationError::NotAllowed {
                field: "measured unit".to_string(),
                allowed: MeasuredUnit::ALL.iter().map(|u| u.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisors() {
        assert_eq!(BaseUnit::Kg.divisor(), 1000);
        assert_eq!(BaseUnit::Litre.divisor(), 1000);
        assert_eq!(BaseUnit::Quintal.divisor(), 100_000);
        assert_eq!(BaseUnit::Dozen.divisor(), 12);
    }

    #[test]
    fn test_default_measured_unit_is_first_option() {
        assert_eq!(BaseUnit::Kg.default_measured_unit(), MeasuredUnit::Gram);
        assert_eq!(BaseUnit::Litre.default_measured_unit(), MeasuredUnit::Ml);
        assert_eq!(BaseUnit::Quintal.default_measured_unit(), MeasuredUnit::Gram);
        assert_eq!(BaseUnit::Dozen.default_measured_unit(), MeasuredUnit::Piece);
        assert_eq!(MeasuredUnit::default(), MeasuredUnit::Gram);
    }

    #[test]
    fn test_measured_per_base() {
        assert_eq!(BaseUnit::Kg.measured_per_base(MeasuredUnit::Kg), Some(1));
        assert_eq!(BaseUnit::Litre.measured_per_base(MeasuredUnit::Ml), Some(1000));
        assert_eq!(BaseUnit::Litre.measured_per_base(MeasuredUnit::Litre), Some(1));
        assert_eq!(
            BaseUnit::Quintal.measured_per_base(MeasuredUnit::Gram),
            Some(100_000)
        );
        assert_eq!(BaseUnit::Dozen.measured_per_base(MeasuredUnit::Piece), Some(12));

        assert_eq!(BaseUnit::Kg.measured_per_base(MeasuredUnit::Ml), None);
        assert_eq!(BaseUnit::Litre.measured_per_base(MeasuredUnit::Piece), None);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("KG".parse::<BaseUnit>().unwrap(), BaseUnit::Kg);
        assert_eq!("liter".parse::<BaseUnit>().unwrap(), BaseUnit::Litre);
        assert_eq!("g".parse::<MeasuredUnit>().unwrap(), MeasuredUnit::Gram);
        assert_eq!("pcs".parse::<MeasuredUnit>().unwrap(), MeasuredUnit::Piece);

        let err = "pound".parse::<BaseUnit>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&BaseUnit::Quintal).unwrap(), "\"quintal\"");
        assert_eq!(serde_json::to_string(&MeasuredUnit::Ml).unwrap(), "\"ml\"");
    }
}
