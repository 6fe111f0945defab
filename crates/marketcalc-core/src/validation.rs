//! # Validation Module
//!
//! Turns free-text form input into definite values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Parse Step                                     │
//! │                                                                         │
//! │  "400"  ──► parse_amount ──► ParsedAmount::Value(400)                  │
//! │  ""     ──► parse_amount ──► ParsedAmount::Incomplete(Empty)           │
//! │  "abc"  ──► parse_amount ──► ParsedAmount::Incomplete(NotANumber)      │
//! │  "-5"   ──► parse_amount ──► ParsedAmount::Incomplete(NotPositive)     │
//! │                  │                                                      │
//! │        ┌─────────┴──────────┐                                           │
//! │        ▼                    ▼                                           │
//! │  preview / pricing    submit enablement                                │
//! │                                                                         │
//! │  Both consumers see the same answer for the same text.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use marketcalc_core::validation::{parse_amount, ParsedAmount};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(parse_amount("12.5"), ParsedAmount::Value(Decimal::new(125, 1)));
//! assert!(!parse_amount("").is_complete());
//! ```

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::MAX_ITEM_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Amount Parsing
// =============================================================================

/// Why an amount field cannot be used yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteReason {
    /// Nothing entered.
    Empty,
    /// Text is not a plain decimal number.
    NotANumber,
    /// Zero or negative.
    NotPositive,
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompleteReason::Empty => f.write_str("empty"),
            IncompleteReason::NotANumber => f.write_str("not a number"),
            IncompleteReason::NotPositive => f.write_str("not positive"),
        }
    }
}

/// Outcome of parsing an amount typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedAmount {
    /// A definite, strictly positive decimal.
    Value(Decimal),
    /// The field cannot be used; the form is incomplete, not erroneous.
    Incomplete(IncompleteReason),
}

impl ParsedAmount {
    /// Checks whether a usable value was entered.
    pub fn is_complete(&self) -> bool {
        matches!(self, ParsedAmount::Value(_))
    }

    /// Returns the value, if any.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            ParsedAmount::Value(v) => Some(*v),
            ParsedAmount::Incomplete(_) => None,
        }
    }

    /// Converts into a [`ValidationResult`] naming `field` on failure.
    pub fn require(self, field: &str) -> ValidationResult<Decimal> {
        match self {
            ParsedAmount::Value(v) => Ok(v),
            ParsedAmount::Incomplete(IncompleteReason::Empty) => Err(ValidationError::Required {
                field: field.to_string(),
            }),
            ParsedAmount::Incomplete(IncompleteReason::NotANumber) => {
                Err(ValidationError::InvalidFormat {
                    field: field.to_string(),
                    reason: "must be a number like 100 or 2.5".to_string(),
                })
            }
            ParsedAmount::Incomplete(IncompleteReason::NotPositive) => {
                Err(ValidationError::MustBePositive {
                    field: field.to_string(),
                })
            }
        }
    }
}

/// Parses a price or quantity typed by the user.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Plain decimal notation only: optional sign, digits, at most one `.`
///   (`"400"`, `"2.5"`, `".5"`); no exponents, separators or units
/// - Zero and negative values are not usable
pub fn parse_amount(input: &str) -> ParsedAmount {
    let text = input.trim();

    if text.is_empty() {
        return ParsedAmount::Incomplete(IncompleteReason::Empty);
    }

    if !is_plain_decimal(text) {
        return ParsedAmount::Incomplete(IncompleteReason::NotANumber);
    }

    match Decimal::from_str(&pad_bare_dot(text)) {
        Ok(value) if value > Decimal::ZERO => ParsedAmount::Value(value),
        Ok(_) => ParsedAmount::Incomplete(IncompleteReason::NotPositive),
        // Too many digits to represent exactly
        Err(_) => ParsedAmount::Incomplete(IncompleteReason::NotANumber),
    }
}

fn is_plain_decimal(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);

    let mut seen_dot = false;
    let mut seen_digit = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }

    seen_digit
}

/// `".5"` → `"0.5"`, `"-5."` → `"-5.0"`, `"+3"` → `"3"`.
fn pad_bare_dot(text: &str) -> String {
    let (sign, digits) = match text.strip_prefix(['-', '+']) {
        Some(rest) => (&text[..1], rest),
        None => ("", text),
    };

    let mut padded = String::with_capacity(text.len() + 2);
    if sign == "-" {
        padded.push('-');
    }
    if digits.starts_with('.') {
        padded.push('0');
    }
    padded.push_str(digits);
    if digits.ends_with('.') {
        padded.push('0');
    }
    padded
}

/// Renders a parsed amount the way it reads best in item details:
/// no trailing zeros, no trailing dot (`"2.50"` → `"2.5"`, `"400.0"` → `"400"`).
pub fn format_amount(value: Decimal) -> String {
    value.normalize().to_string()
}

// =============================================================================
// Name Validators
// =============================================================================

/// Validates an item name that must be present (MRP items).
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use marketcalc_core::validation::validate_required_name;
///
/// assert_eq!(validate_required_name("  Milk ").unwrap(), "Milk");
/// assert!(validate_required_name("   ").is_err());
/// ```
pub fn validate_required_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    check_name_length(name)?;
    Ok(name.to_string())
}

/// Validates an optional item name (weighed items).
///
/// ## Returns
/// The trimmed name, or `default` when nothing was entered.
pub fn validate_optional_name(name: &str, default: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Ok(default.to_string());
    }

    check_name_length(name)?;
    Ok(name.to_string())
}

fn check_name_length(name: &str) -> ValidationResult<()> {
    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
