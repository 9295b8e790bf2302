//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Cart construction failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-catalog errors (separate crate)                                 │
//! │  └── CatalogError     - File, JSON, TOML and rule-spec failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → anyhow (CLI)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Discount rules themselves never fail: `process` is total over any cart
//! that passed validation. Every error in this file is raised before the
//! checkout starts.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two line items in the same cart share an id.
    ///
    /// ## When This Occurs
    /// - Two catalog loaders with independent id seeds fed the same cart
    /// - A caller built line items by hand and reused an id
    #[error("Line item id {0} is already in the cart")]
    DuplicateItemId(u32),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the [`crate::validation`] helpers and by [`crate::Money::parse_decimal`].
#[derive(Debug, Error, PartialEq, Eq)]
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

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. a price with three decimal places).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. the same tag twice in one rule).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DuplicateItemId(7);
        assert_eq!(err.to_string(), "Line item id 7 is already in the cart");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::OutOfRange {
            field: "percent_off".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "percent_off must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
