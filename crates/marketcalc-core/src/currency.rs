//! # Currency Catalog
//!
//! The fixed list of currencies a bill can be displayed in.
//!
//! Selecting a currency changes only the symbol and flag shown next to the
//! amounts. There is no exchange-rate conversion: 40.00 stays 40.00.

use serde::Serialize;
use std::fmt;

/// A display descriptor for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    /// ISO 4217 code, also the persisted value.
    pub code: &'static str,
    /// Symbol printed in front of amounts.
    pub symbol: &'static str,
    /// Flag glyph shown in the currency picker.
    pub flag: &'static str,
    /// Human-readable name.
    pub name: &'static str,
}

/// All supported currencies. The first entry is the default.
pub const CATALOG: [Currency; 10] = [
    Currency { code: "INR", symbol: "₹", flag: "🇮🇳", name: "Indian Rupee" },
    Currency { code: "USD", symbol: "$", flag: "🇺🇸", name: "US Dollar" },
    Currency { code: "EUR", symbol: "€", flag: "🇪🇺", name: "Euro" },
    Currency { code: "GBP", symbol: "£", flag: "🇬🇧", name: "British Pound" },
    Currency { code: "JPY", symbol: "¥", flag: "🇯🇵", name: "Japanese Yen" },
    Currency { code: "AUD", symbol: "A$", flag: "🇦🇺", name: "Australian Dollar" },
    Currency { code: "CAD", symbol: "C$", flag: "🇨🇦", name: "Canadian Dollar" },
    Currency { code: "SGD", symbol: "S$", flag: "🇸🇬", name: "Singapore Dollar" },
    Currency { code: "AED", symbol: "د.إ", flag: "🇦🇪", name: "UAE Dirham" },
    Currency { code: "PKR", symbol: "₨", flag: "🇵🇰", name: "Pakistani Rupee" },
];

impl Currency {
    /// The default currency (first catalog entry).
    pub fn default_entry() -> &'static Currency {
        &CATALOG[0]
    }

    /// Looks up a catalog entry by code, ignoring case and surrounding
    /// whitespace.
    ///
    /// ## Example
    /// ```rust
    /// use marketcalc_core::currency::Currency;
    ///
    /// assert_eq!(Currency::find("usd").unwrap().symbol, "$");
    /// assert!(Currency::find("XYZ").is_none());
    /// ```
    pub fn find(code: &str) -> Option<&'static Currency> {
        let code = code.trim();
        CATALOG.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// All catalog entries, in display order.
    pub fn all() -> &'static [Currency] {
        &CATALOG
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.flag, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_is_inr() {
        let default = Currency::default_entry();
        assert_eq!(default.code, "INR");
        assert_eq!(default.symbol, "₹");
    }

    #[test]
    fn test_catalog_codes_unique() {
        let codes: HashSet<_> = CATALOG.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), CATALOG.len());
    }

    #[test]
    fn test_find() {
        assert_eq!(Currency::find("PKR").unwrap().name, "Pakistani Rupee");
        assert_eq!(Currency::find(" gbp ").unwrap().symbol, "£");
        assert!(Currency::find("").is_none());
        assert!(Currency::find("XYZ").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Currency::find("EUR").unwrap().to_string(), "🇪🇺 EUR");
    }
}
