//! # Store Error Types
//!
//! Errors for durable state operations. Storage failures, serialization
//! failures, domain rule violations bubbled up from tienda-core, and typed
//! authentication failures.

use thiserror::Error;

use crate::kv::KvError;
use tienda_core::{CoreError, ValidationError};

/// Errors from the durable state layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key-value backend failed.
    #[error("storage error: {0}")]
    Kv(#[from] KvError),

    /// A state snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A business rule was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Caller input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Login with an unknown email or wrong password.
    ///
    /// Callers map this to a user-visible message; it intentionally does
    /// not say which of the two was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account.
    #[error("an account already exists for {email}")]
    DuplicateEmail { email: String },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
        assert_eq!(
            StoreError::DuplicateEmail {
                email: "carlos@gmail.com".to_string()
            }
            .to_string(),
            "an account already exists for carlos@gmail.com"
        );
    }

    #[test]
    fn test_core_errors_convert() {
        let err: StoreError = CoreError::EmptyCart.into();
        assert!(matches!(err, StoreError::Core(CoreError::EmptyCart)));
    }
}
