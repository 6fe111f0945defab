//! # Error Types
//!
//! Domain-specific error types for marketcalc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  marketcalc-core errors (this file)                                    │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Form input that cannot be submitted            │
//! │  └── StoreError       - Key-value store failures (never fatal)         │
//! │                                                                         │
//! │  marketcalc-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── AppError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, code, unit)
//! 3. Errors are enum variants, never String
//! 4. An invalid form is not a failure of the system: it only means the
//!    submit action stays disabled

use thiserror::Error;

use crate::units::{BaseUnit, MeasuredUnit};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Currency code is not in the catalog.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Measured unit cannot be converted into the base unit.
    ///
    /// ## When This Occurs
    /// - Pricing a quantity in `ml` against a price per `kg`
    /// - Pricing `piece` against anything other than `dozen`
    #[error("Cannot measure {measured} against a price per {base}")]
    UnitMismatch {
        base: BaseUnit,
        measured: MeasuredUnit,
    },

    /// A line price above the per-line limit, or a line that would push
    /// the bill total past what can be represented.
    #[error("Amount is too large to bill")]
    AmountOverflow,

    /// Reset was confirmed without being requested first.
    ///
    /// ## User Workflow
    /// ```text
    /// reset ──► "Reset bill?" ──► confirm ──► empty bill
    ///   │                           ▲
    ///   └── skipping this step ─────┘  ResetNotRequested
    /// ```
    #[error("Reset must be requested before it can be confirmed")]
    ResetNotRequested,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Used to keep the submit action disabled and to tell the user why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Positive input whose billed amount rounds to zero.
    #[error("{field} is too small to bill")]
    TooSmall { field: String },

    /// Invalid format (e.g., not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Store Error
// =============================================================================

/// Failures reported by a [`KeyValueStore`](crate::preferences::KeyValueStore).
///
/// Preference persistence is fire-and-forget, so these are logged and
/// dropped by the preferences layer rather than propagated.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Preference store unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected the operation.
    #[error("Preference store operation failed: {0}")]
    Failed(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
