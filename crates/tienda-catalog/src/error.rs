//! Catalog error types.
//!
//! A failed fetch is recoverable: the storefront keeps running with an
//! empty (or previously loaded) listing rather than crashing.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from a catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog source could not be reached or answered with an error.
    #[error("catalog unavailable: {reason}")]
    Unavailable { reason: String },

    /// The catalog answered, but the payload did not match the expected
    /// wire schema.
    #[error("malformed catalog payload: {reason}")]
    Malformed { reason: String },
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Malformed {
                reason: err.to_string(),
            }
        } else {
            CatalogError::Unavailable {
                reason: err.to_string(),
            }
        }
    }
}
