//! Commerce error types.

use makerset_store::StoreError;
use thiserror::Error;

use crate::checkout::StockValidationResult;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted with no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// A validation or submission is already in flight.
    #[error("Checkout already in progress ({0})")]
    CheckoutInProgress(String),

    /// Required checkout form fields are missing or malformed.
    #[error("Please fill in the required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The stock check itself could not be performed.
    #[error("Stock validation failed: {0}")]
    StockValidationFailed(String),

    /// One or more kits cannot be fulfilled from current stock.
    #[error("{message}")]
    InsufficientStock {
        message: String,
        results: Vec<StockValidationResult>,
    },

    /// The backend rejected or failed to create the order.
    #[error("Order failed: {0}")]
    OrderFailed(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid catalog or inventory input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Local storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
