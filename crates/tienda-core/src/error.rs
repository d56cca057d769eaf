//! # Error Types
//!
//! Domain-specific error types for tienda-core.
//!
//! Errors are enum variants, never strings, and each variant carries the
//! context a caller needs to map it to a user-facing message. Storage and
//! network failures are modeled in tienda-store / tienda-catalog; this
//! module covers business rules only.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A cart index does not point at an existing line item.
    #[error("no line item at index {index} (cart has {len} items)")]
    LineItemOutOfRange { index: usize, len: usize },

    /// A checkout transition was attempted from the wrong state.
    #[error("cannot {action} while checkout is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    /// Checkout was started or confirmed on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input does not meet requirements, before any
/// business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Quantity must be at least 1.
    #[error("quantity must be at least 1, got {requested}")]
    InvalidQuantity { requested: i64 },

    /// Prices must be non-negative.
    #[error("price must not be negative, got {cents} cents")]
    NegativePrice { cents: i64 },

    /// Invalid format (e.g. a malformed email address).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineItemOutOfRange { index: 3, len: 1 };
        assert_eq!(err.to_string(), "no line item at index 3 (cart has 1 items)");

        let err = ValidationError::InvalidQuantity { requested: 0 };
        assert_eq!(err.to_string(), "quantity must be at least 1, got 0");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::InvalidQuantity { requested: -1 };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
