//! # Error Types
//!
//! Domain errors for catalog and cart operations.
//!
//! ## Design
//! Two layers:
//! - [`ValidationError`]: input problems (empty name, negative stock)
//!   detected before any state changes
//! - [`CoreError`]: business rule violations plus a wrapper for validation
//!   failures
//!
//! Every variant carries the data a frontend needs to build a user-facing
//! message, and the `Display` strings are stable enough to show directly.

use thiserror::Error;

/// Result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Business rule violations raised by the catalog and the cart.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// No product with the given id or barcode exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product has zero (or negative) stock, so not even one unit can
    /// be added to the cart.
    #[error("Out of stock: {name}")]
    OutOfStock { name: String },

    /// The cart already holds every available unit of this product.
    #[error("Insufficient stock for {name}: {available} available, {requested} requested")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Field-level input validation failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    #[error("{field} is invalid: {reason}")]
    InvalidFormat { field: String, reason: String },
}
