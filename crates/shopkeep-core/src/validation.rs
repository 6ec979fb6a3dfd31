//! # Validation Module
//!
//! Field rules applied by create and update.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  ├── Type validation (numbers parse, IDs are integers)                 │
//! │  └── Immediate usage feedback                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name required                                                     │
//! │  ├── price finite and non-negative                                     │
//! │  └── stock non-negative                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory (shopkeep-store)                                   │
//! │  └── ID lookup, then the write                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopkeep_core::validation::{validate_item_name, validate_stock};
//!
//! assert_eq!(validate_item_name(" Laptop ").unwrap(), "Laptop");
//! assert!(validate_stock(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::DEFAULT_CATEGORY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// ## Example
/// ```rust
/// use shopkeep_core::validation::validate_item_name;
///
/// assert!(validate_item_name("노트북").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(name.to_string())
}

/// Resolves the category, falling back to [`DEFAULT_CATEGORY`] when absent
/// or blank.
pub fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

/// Blank descriptions are stored as absent.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be a finite number (no NaN, no infinity)
/// - Must be non-negative; zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use shopkeep_core::validation::validate_price;
///
/// assert!(validate_price(1000.0).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-100.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<f64> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    // -0.0 passes the check above; store it as plain zero.
    Ok(price + 0.0)
}

/// Validates a stock count and narrows it to the stored width.
///
/// ## Rules
/// - Must be non-negative
/// - Must fit in `u32`
pub fn validate_stock(stock: i64) -> ValidationResult<u32> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    u32::try_from(stock).map_err(|_| ValidationError::OutOfRange {
        field: "stock".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert_eq!(validate_item_name("Laptop").unwrap(), "Laptop");
        assert_eq!(validate_item_name("  Mouse  ").unwrap(), "Mouse");
        assert!(matches!(
            validate_item_name(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_item_name("\t \n").is_err());
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category(Some("전자제품")), "전자제품");
        assert_eq!(normalize_category(Some("  ")), DEFAULT_CATEGORY);
        assert_eq!(normalize_category(None), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_normalize_description() {
        assert_eq!(normalize_description(Some("  ")), None);
        assert_eq!(normalize_description(None), None);
        assert_eq!(normalize_description(Some(" fast ")).as_deref(), Some("fast"));
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(0.0).unwrap(), 0.0);
        assert_eq!(validate_price(1099.5).unwrap(), 1099.5);
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_price_negative_zero() {
        let price = validate_price(-0.0).unwrap();
        assert!(price.is_sign_positive());
    }

    #[test]
    fn test_validate_stock() {
        assert_eq!(validate_stock(0).unwrap(), 0);
        assert_eq!(validate_stock(50).unwrap(), 50);
        assert!(matches!(
            validate_stock(-1),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            validate_stock(i64::from(u32::MAX) + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
