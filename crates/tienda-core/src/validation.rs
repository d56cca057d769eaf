//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! Validators run before business logic and return typed errors that the
//! caller maps to user-facing messages.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity.
///
/// ## Rules
/// - Must be at least 1. The web UI silently ignores smaller values; here
///   the rejection is surfaced to the caller.
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty < 1 {
        return Err(ValidationError::InvalidQuantity { requested: qty });
    }

    Ok(qty as u32)
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::NegativePrice { cents });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an email address for registration.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one `@` with a non-empty local part and a domain
///   containing a dot
///
/// This is the shallow check a storefront form performs, not full RFC 5322.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "expected local@domain.tld",
        });
    }

    Ok(())
}

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty after trimming.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1).unwrap(), 1);
        assert_eq!(validate_quantity(42).unwrap(), 42);

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1999).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("carlos@gmail.com").is_ok());
        assert!(validate_email("  aurelio@gmail.com ").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("carlos").is_err());
        assert!(validate_email("carlos@").is_err());
        assert!(validate_email("@gmail.com").is_err());
        assert!(validate_email("carlos@gmail").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Carlos").is_ok());
        assert!(validate_name("   ").is_err());
    }
}
