//! # Error Types
//!
//! Domain-specific error types for butterfly-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  butterfly-core errors (this file)                                     │
//! │  ├── CoreError        - Checkout / order construction failures         │
//! │  └── ValidationError  - Input validation at the UI/API boundary        │
//! │                                                                         │
//! │  butterfly-cart errors (separate crate)                                │
//! │  ├── SlotError        - Durable slot read/write failures               │
//! │  └── CodecError       - Persisted cart (de)serialization failures      │
//! │                                                                         │
//! │  Cart mutations themselves have NO error type: unknown ids are no-ops  │
//! │  and persistence failures are logged and swallowed by the store.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning a cart into an order.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The order endpoint only accepts integer product ids.
    ///
    /// ## When This Occurs
    /// - A line item was added with a non-numeric string id
    #[error("Product id '{0}' is not a valid order product id")]
    InvalidProductId(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are produced by [`crate::validation`] at the boundary between the
/// UI/API and the cart, never by the cart itself.
#[derive(Debug, Error)]
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

    /// Invalid format (e.g., phone number with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Fewer units in stock than requested (`available` may be 0).
    #[error("only {available} of {product} left in stock")]
    InsufficientStock { product: String, available: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
