//! # Validation
//!
//! Input validators for catalog registration. Each validator either
//! returns the cleaned value or a [`ValidationError`] naming the field, so
//! callers can surface the failure next to the offending form input.

use crate::error::ValidationError;
use crate::types::NewProduct;

/// Result alias for validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name: trims surrounding whitespace, rejects empty
/// and over-long names. Returns the trimmed name.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    // chars, not bytes: names are frequently non-ASCII
    if trimmed.chars().count() > crate::MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: crate::MAX_PRODUCT_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Validates a unit price: must be a finite number greater than zero.
pub fn validate_price(price: f64) -> ValidationResult<f64> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "not a finite number".to_string(),
        });
    }
    if price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(price)
}

/// Validates a stock count: zero is legal (the product simply cannot be
/// sold), negative is not.
pub fn validate_stock(stock: i64) -> ValidationResult<i64> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }
    Ok(stock)
}

/// Validates a complete registration input, returning a cleaned copy with
/// the name trimmed.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<NewProduct> {
    Ok(NewProduct {
        name: validate_product_name(&input.name)?,
        price: validate_price(input.price)?,
        stock: validate_stock(input.stock)?,
    })
}
