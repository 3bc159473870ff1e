//! # Validation Module
//!
//! Form-layer checks for intake, invoice and proposal drafts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input (web front end)                                   │
//! │  └── Immediate feedback while typing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Checks a draft once, before it becomes a record                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Hosted document store rules                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The money functions stay permissive (a negative quantity simply lowers a
//! subtotal). Rejecting such input is this module's job.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::invoice::LineItem;
use crate::money::Money;
use crate::types::TaxRate;
use crate::{MAX_LINE_ITEMS, MAX_NAME_LENGTH, MAX_TAX_RATE_PERCENT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Predicates
// =============================================================================

/// Loose email shape check: `local@domain.tld`, no whitespace.
///
/// ```rust
/// use devnetiks_core::validation::is_email;
///
/// assert!(is_email("ops@devnetiks.com"));
/// assert!(!is_email("ops@localhost"));
/// ```
pub fn is_email(value: &str) -> bool {
    let bad = |c: char| c.is_whitespace() || c == '@';
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(bad) || domain.chars().any(bad) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// A phone number has 10 to 15 digits once formatting is removed.
pub fn is_phone(value: &str) -> bool {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    (10..=15).contains(&digits)
}

/// Present and not just whitespace.
pub fn required(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required, length-limited text field.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Validates an email field.
pub fn validate_email(value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }
    if !is_email(value.trim()) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }
    Ok(())
}

/// Validates a tax rate (0% to 100%).
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.is_negative() || rate.percent() > Decimal::from(MAX_TAX_RATE_PERCENT) {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: i64::from(MAX_TAX_RATE_PERCENT),
        });
    }
    Ok(())
}

/// Validates a non-negative amount such as a discount or flat tax.
pub fn validate_non_negative_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Line Items
// =============================================================================

/// Validates a single line item.
///
/// ## Rules
/// - Name is required (at most 200 characters)
/// - Quantity >= 0
/// - Unit amount >= 0 cents
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_required("name", &item.name)?;

    if item.quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }
    if item.unit_amount_cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit amount".to_string(),
        });
    }
    Ok(())
}

/// Validates a line item list: size limit, unique ids, each item.
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "line items".to_string(),
            min: 0,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "line item id".to_string(),
            });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "line item id".to_string(),
                value: item.id.clone(),
            });
        }
        validate_line_item(item)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, quantity: i64, unit: i64) -> LineItem {
        LineItem::new(id, "Design", quantity, unit)
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("a@b.co"));
        assert!(is_email("first.last@mail.example.org"));
        assert!(!is_email(""));
        assert!(!is_email("no-at-sign.com"));
        assert!(!is_email("two@@example.com"));
        assert!(!is_email("space @example.com"));
        assert!(!is_email("a@.com"));
        assert!(!is_email("a@example."));
    }

    #[test]
    fn test_is_phone() {
        assert!(is_phone("(555) 123-4567"));
        assert!(is_phone("+44 20 7946 0958"));
        assert!(!is_phone("555-1234"));
        assert!(!is_phone("1234567890123456"));
    }

    #[test]
    fn test_required() {
        assert!(required(Some("x")));
        assert!(!required(Some("   ")));
        assert!(!required(None));
    }

    #[test]
    fn test_validate_line_item() {
        assert!(validate_line_item(&item("1", 2, 2000)).is_ok());
        assert!(validate_line_item(&item("1", 0, 0)).is_ok());
        assert_eq!(
            validate_line_item(&item("1", -1, 2000)),
            Err(ValidationError::MustNotBeNegative {
                field: "quantity".to_string()
            })
        );
        assert!(validate_line_item(&item("1", 1, -5)).is_err());
        assert!(validate_line_item(&LineItem::new("1", " ", 1, 1)).is_err());
    }

    #[test]
    fn test_validate_line_items_rejects_duplicate_ids() {
        let items = vec![item("a", 1, 100), item("a", 1, 100)];
        assert!(matches!(
            validate_line_items(&items),
            Err(ValidationError::Duplicate { .. })
        ));
        assert!(validate_line_items(&[item("a", 1, 100), item("b", 1, 100)]).is_ok());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::from_bps(0)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10_000)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_percentage(8.875)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10_001)).is_err());
        assert!(matches!(
            validate_tax_rate(TaxRate::from_percent(Decimal::new(-5, 0))),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email(" client@acme.io ").is_ok());
        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_email("client"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
