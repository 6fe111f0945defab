//! # Application Error Type
//!
//! Unified error type for terminal commands and startup.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in MarketCalc                             │
//! │                                                                         │
//! │  typed line ──► commands::parse ──► UNKNOWN_COMMAND / VALIDATION_ERROR │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               commands::dispatch                                        │
//! │                      │                                                  │
//! │     CoreError ───────┼──► VALIDATION_ERROR / UNKNOWN_CURRENCY / ...    │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               repl prints "error: <message>" and keeps going           │
//! │                                                                         │
//! │  startup: DbError / io::Error ──► DATABASE_ERROR / IO_ERROR ──► exit 1 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing typed at the prompt ends the session; only startup errors and
//! a closed stdin do.

use marketcalc_core::{CoreError, ValidationError};
use marketcalc_db::DbError;
use serde::Serialize;

/// Error shown to the user.
///
/// ## Serialization
/// ```json
/// { "code": "UNKNOWN_CURRENCY", "message": "Unknown currency code: XYZ" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input the form cannot accept
    ValidationError,

    /// Currency code not in the catalog
    UnknownCurrency,

    /// Unit pair that cannot be converted
    UnitMismatch,

    /// Typed text is not a command
    UnknownCommand,

    /// Command not available while a dialog is open (or not open)
    WrongDialog,

    /// Business rule refused the action
    BusinessLogic,

    /// Preference database failed
    DatabaseError,

    /// Terminal input/output failed
    IoError,

    /// Anything else
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn unknown_command(input: &str) -> Self {
        AppError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command: '{}'. Type 'help' for a list.", input),
        )
    }

    pub fn wrong_dialog(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::WrongDialog, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Result type for terminal operations.
pub type AppResult<T> = Result<T, AppError>;

/// Converts database errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(
                    ErrorCode::DatabaseError,
                    "Could not open the preferences database (try --ephemeral)",
                )
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Preferences database migration failed")
            }
            other => {
                tracing::error!("Database error: {}", other);
                AppError::new(ErrorCode::DatabaseError, "Preferences database operation failed")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownCurrency(_) => {
                AppError::new(ErrorCode::UnknownCurrency, err.to_string())
            }
            CoreError::UnitMismatch { .. } => AppError::new(ErrorCode::UnitMismatch, err.to_string()),
            CoreError::AmountOverflow | CoreError::ResetNotRequested => {
                AppError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use marketcalc_core::units::{BaseUnit, MeasuredUnit};

    #[test]
    fn test_core_error_codes() {
        let err: AppError = CoreError::UnknownCurrency("XYZ".to_string()).into();
        assert_eq!(err.code, ErrorCode::UnknownCurrency);
        assert_eq!(err.message, "Unknown currency code: XYZ");

        let err: AppError = CoreError::UnitMismatch {
            base: BaseUnit::Dozen,
            measured: MeasuredUnit::Gram,
        }
        .into();
        assert_eq!(err.code, ErrorCode::UnitMismatch);

        let err: AppError = CoreError::ResetNotRequested.into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_validation_error_keeps_message() {
        let err: AppError = CoreError::Validation(ValidationError::Required {
            field: "quantity".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "quantity is required");
    }

    #[test]
    fn test_db_error_hides_details() {
        let err: AppError = DbError::QueryFailed("near \"SELEC\": syntax error".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("SELEC"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_value(AppError::unknown_command("dance")).unwrap();
        assert_eq!(json["code"], "UNKNOWN_COMMAND");
    }
}
