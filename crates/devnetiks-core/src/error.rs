//! # Error Types
//!
//! Domain-specific error types for devnetiks-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  devnetiks-core errors (this file)                                     │
//! │  ├── CoreError        - Domain and settings errors                     │
//! │  ├── ValidationError  - Form input validation failures                 │
//! │  └── MoneyParseError  - Strict money parsing failures                  │
//! │                                                                         │
//! │  devnetiks-cli errors (app)                                            │
//! │  └── ConfigError      - Settings file / environment problems           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (binary) → stderr          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most money and access functions never return these. They degrade to a
//! safe default instead (`0` cents, no privileges). The typed errors exist for
//! callers that need to tell "entered zero" from "entered garbage", and for
//! draft validation before a record is written.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A draft refers to a quote that is no longer open for a response.
    #[error("Quote {quote_id} is {status}, cannot attach a proposal")]
    QuoteNotRespondable { quote_id: String, status: String },

    /// A money field could not be parsed in strict mode.
    #[error("Invalid amount: {0}")]
    MoneyParse(#[from] MoneyParseError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Portal settings are well-formed but not usable.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Portal settings could not be read or written as TOML.
    #[error("Settings format error: {0}")]
    SettingsFormat(String),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::SettingsFormat(err.to_string())
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::SettingsFormat(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input doesn't meet requirements. The calculation
/// functions accept anything; validation is a separate, explicit step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid email, out-of-range timestamp).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two line items sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Money Parse Error
// =============================================================================

/// Why a free-text amount could not be turned into cents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    /// The input was blank or whitespace only.
    #[error("amount is empty")]
    Empty,

    /// The cleaned text is not a decimal number.
    #[error("'{input}' is not a valid amount")]
    Invalid { input: String },

    /// The amount does not fit in 64-bit cents.
    #[error("'{input}' is too large")]
    OutOfRange { input: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuoteNotRespondable {
            quote_id: "qte_1".to_string(),
            status: "archived".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Quote qte_1 is archived, cannot attach a proposal"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must not be negative");
    }

    #[test]
    fn test_money_parse_error_messages() {
        assert_eq!(MoneyParseError::Empty.to_string(), "amount is empty");
        let err = MoneyParseError::Invalid {
            input: "1.2.3".to_string(),
        };
        assert_eq!(err.to_string(), "'1.2.3' is not a valid amount");
    }

    #[test]
    fn test_conversions_into_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "sku".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = MoneyParseError::Empty.into();
        assert!(matches!(core_err, CoreError::MoneyParse(_)));
    }
}
