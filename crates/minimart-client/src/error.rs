//! # API Error Envelope
//!
//! Every session operation that can fail hands the frontend an
//! [`ApiError`]: a machine-readable code plus a message fit for direct
//! display. Conversions from the domain error types live here so the
//! mapping sits in one place.
//!
//! Internal detail (transport failures and their causes) is logged, never
//! serialized into the envelope.

use serde::Serialize;

use crate::checkout::CheckoutError;
use minimart_core::CoreError;

/// Error payload handed to the embedding frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

/// Machine-readable error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Requested entity does not exist
    NotFound,
    /// Input failed validation
    ValidationError,
    /// Cart operation failed
    CartError,
    /// Not enough stock to satisfy the request
    InsufficientStock,
    /// Order submission failed
    CheckoutError,
    /// Business rule violation
    BusinessLogic,
    /// Unexpected internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Entity lookup failure, e.g. `ApiError::not_found("Product", "42")`.
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::ProductNotFound(_) => Self::new(ErrorCode::NotFound, err.to_string()),
            CoreError::OutOfStock { .. } | CoreError::InsufficientStock { .. } => {
                Self::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(validation) => Self::validation(validation.to_string()),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match &err {
            CheckoutError::Transport(source) => {
                // Log the cause; the frontend gets a stable message.
                tracing::error!(error = %source, "Checkout transport failure");
                Self::new(ErrorCode::CheckoutError, "Could not reach the order service")
            }
            CheckoutError::MalformedReply => {
                tracing::warn!("Order endpoint reply matched no known shape");
                Self::new(
                    ErrorCode::CheckoutError,
                    "Order service returned an unexpected reply",
                )
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
