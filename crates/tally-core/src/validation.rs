//! # Validation Module
//!
//! Input validation for everything that reaches the discount engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (tally-catalog)                              │
//! │  ├── JSON / TOML shape                                                 │
//! │  └── Decimal price parsing                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── SKU / name / tag format                                           │
//! │  ├── Non-negative prices                                               │
//! │  └── Percent off within 0..=100                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Discount rules (tally-core::rules)                           │
//! │  └── Assume valid input, never fail                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_sku, validate_percent_off};
//!
//! assert!(validate_sku("COKE-330").is_ok());
//! assert!(validate_percent_off(12).is_ok());
//! assert!(validate_percent_off(120).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PERCENT_OFF;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_SKU_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;
const MAX_TAG_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens and underscores
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_sku;
///
/// assert!(validate_sku("COKE-330").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.chars().count() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: MAX_SKU_LEN,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a rule-matching tag.
///
/// Tags are free text (the default rule set uses tags such as
/// `add-on-deal`), so only emptiness and length are checked.
pub fn validate_tag(tag: &str) -> ValidationResult<()> {
    let tag = tag.trim();

    if tag.is_empty() {
        return Err(ValidationError::Required {
            field: "tag".to_string(),
        });
    }

    if tag.chars().count() > MAX_TAG_LEN {
        return Err(ValidationError::TooLong {
            field: "tag".to_string(),
            max: MAX_TAG_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price or rule amount (must be zero or greater).
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::validation::validate_price;
///
/// assert!(validate_price("price", Money::from_cents(0)).is_ok());
/// assert!(validate_price("price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a percent-off parameter (0-100 inclusive).
///
/// Accepts i64 so that out-of-range config values (`-5`, `300`) are
/// reported rather than wrapped by a narrowing conversion.
pub fn validate_percent_off(percent: i64) -> ValidationResult<u8> {
    if !(0..=i64::from(MAX_PERCENT_OFF)).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "percent_off".to_string(),
            min: 0,
            max: i64::from(MAX_PERCENT_OFF),
        });
    }
    // In range 0..=100, so the conversion cannot fail.
    u8::try_from(percent).map_err(|_| ValidationError::OutOfRange {
        field: "percent_off".to_string(),
        min: 0,
        max: i64::from(MAX_PERCENT_OFF),
    })
}

/// Validates that two tags used by the same rule are distinct.
pub fn validate_distinct_tags(first: &str, second: &str) -> ValidationResult<()> {
    if first.trim() == second.trim() {
        return Err(ValidationError::Duplicate {
            field: "tag".to_string(),
            value: first.trim().to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("COKE-330").is_ok());
        assert!(validate_sku("tea_green_500").is_ok());
        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"X".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Green Tea 500ml").is_ok());
        assert_eq!(
            validate_product_name(" "),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(validate_product_name(&"n".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_tag() {
        assert!(validate_tag("best-selling-drinks").is_ok());
        assert!(validate_tag("熱銷飲品").is_ok());
        assert!(validate_tag("").is_err());
        assert!(validate_tag(&"t".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("price", Money::from_cents(6500)).is_ok());
        assert!(validate_price("price", Money::zero()).is_ok());
        assert_eq!(
            validate_price("special_price", Money::from_cents(-1)),
            Err(ValidationError::MustNotBeNegative {
                field: "special_price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_percent_off() {
        assert_eq!(validate_percent_off(0), Ok(0));
        assert_eq!(validate_percent_off(12), Ok(12));
        assert_eq!(validate_percent_off(100), Ok(100));
        assert!(validate_percent_off(-1).is_err());
        assert!(validate_percent_off(101).is_err());
    }

    #[test]
    fn test_validate_distinct_tags() {
        assert!(validate_distinct_tags("a", "b").is_ok());
        assert!(validate_distinct_tags("a", " a ").is_err());
    }
}
