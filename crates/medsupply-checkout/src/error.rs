//! Checkout error types.

use medsupply_api::FetchError;
use thiserror::Error;

/// Errors raised by the infrastructure around the checkout core.
///
/// Field validation failures are never reported through this type; they live in
/// [`ValidationResult`](crate::validation::ValidationResult).
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Cart has no line items.
    #[error("Cart is empty")]
    CartEmpty,

    /// Wizard step number outside 1..=3.
    #[error("Invalid checkout step: {0}")]
    InvalidStep(u8),

    /// Order cannot be submitted yet.
    #[error("Checkout incomplete: {0}")]
    Incomplete(String),

    /// Submission refused after the advisory attempt limit was reached.
    #[error("Too many attempts: {0}")]
    TooManyAttempts(u32),

    /// Order status change not permitted for the acting role.
    #[error("Invalid order status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Storefront API failure.
    #[error("API error: {0}")]
    Api(#[from] FetchError),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CheckoutError {
    fn from(e: serde_json::Error) -> Self {
        CheckoutError::SerializationError(e.to_string())
    }
}
