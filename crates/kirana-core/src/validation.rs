//! # Validation Module
//!
//! Input validation for operator-entered product data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: UI form                                                   │
//! │  ├── Basic format checks for immediate feedback                    │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  ├── Required fields, barcode format, non-negative numbers         │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Catalog                                                   │
//! │  ├── Duplicate name / duplicate barcode (needs the full index)     │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 4: Database (SQLite)                                         │
//! │  ├── NOT NULL, UNIQUE, foreign key constraints                     │
//! │                                                                     │
//! │  Defense in depth: multiple layers catch different errors          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Uniqueness is deliberately NOT checked here: it needs the catalog's
//! indexes and lives in [`crate::catalog`].

use crate::error::ValidationError;
use crate::types::NewProduct;
use crate::{BARCODE_MAX_DIGITS, BARCODE_MIN_DIGITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    Ok(())
}

/// Validates a barcode.
///
/// ## Rules
/// - Empty (after trimming) is allowed: name-lookup-only products
/// - Otherwise 8-13 characters, ASCII digits only
///
/// ## Example
/// ```rust
/// use kirana_core::validation::validate_barcode;
///
/// assert!(validate_barcode("8901234567890").is_ok()); // EAN-13
/// assert!(validate_barcode("12345678").is_ok());      // EAN-8
/// assert!(validate_barcode("").is_ok());              // no barcode
/// assert!(validate_barcode("1234567").is_err());      // too short
/// assert!(validate_barcode("12345678901234").is_err());
/// assert!(validate_barcode("12345abc").is_err());
/// ```
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Ok(());
    }

    let len = barcode.chars().count();
    if len < BARCODE_MIN_DIGITS || len > BARCODE_MAX_DIGITS {
        return Err(ValidationError::BarcodeLength {
            len,
            min: BARCODE_MIN_DIGITS,
            max: BARCODE_MAX_DIGITS,
        });
    }

    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::BarcodeNotNumeric);
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative and finite
/// - Zero is allowed (free items)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::Negative { field: "price" });
    }
    Ok(())
}

/// Validates a stock count.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::Negative { field: "stock" });
    }
    Ok(())
}

/// Validates a low-stock alert threshold.
pub fn validate_low_stock_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::Negative {
            field: "low stock threshold",
        });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a product form in declaration order, stopping
/// at the first failure.
///
/// ## What Is NOT Checked Here
/// Duplicate name and duplicate barcode need the catalog's indexes; the
/// catalog enforces them on insert/update regardless of what callers do.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    if input.category.trim().is_empty() {
        return Err(ValidationError::Required { field: "category" });
    }
    validate_price(input.price)?;
    validate_stock(input.stock)?;
    validate_low_stock_threshold(input.low_stock_threshold)?;
    validate_barcode(&input.barcode)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_input() -> NewProduct {
        NewProduct {
            name: "Organic Milk".to_string(),
            category: "Dairy".to_string(),
            price: 60.0,
            stock: 50,
            low_stock_threshold: 10,
            expiry_date: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
            barcode: "8901234567890".to_string(),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Organic Milk").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_barcode_length_bounds() {
        // 7 / 8 / 13 / 14 digit boundary cases.
        assert!(validate_barcode("1234567").is_err());
        assert!(validate_barcode("12345678").is_ok());
        assert!(validate_barcode("1234567890123").is_ok());
        assert!(validate_barcode("12345678901234").is_err());
    }

    #[test]
    fn test_barcode_charset_and_empty() {
        assert!(validate_barcode("").is_ok());
        assert!(validate_barcode("   ").is_ok());
        assert_eq!(
            validate_barcode("12345abc"),
            Err(ValidationError::BarcodeNotNumeric)
        );
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(60.5).is_ok());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        assert!(validate_new_product(&valid_input()).is_ok());

        let mut p = valid_input();
        p.name = "  ".to_string();
        assert_eq!(
            validate_new_product(&p),
            Err(ValidationError::Required { field: "name" })
        );

        let mut p = valid_input();
        p.stock = -5;
        assert_eq!(
            validate_new_product(&p),
            Err(ValidationError::Negative { field: "stock" })
        );

        let mut p = valid_input();
        p.barcode = "123".to_string();
        assert!(matches!(
            validate_new_product(&p),
            Err(ValidationError::BarcodeLength { len: 3, .. })
        ));
    }
}
