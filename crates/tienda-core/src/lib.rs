//! # tienda-core: Pure Business Logic for the tienda Storefront
//!
//! This crate is the heart of the storefront. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Size, User, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The shopping cart and its derived totals
//! - [`wishlist`] - Favorited products with set semantics
//! - [`notifications`] - The ordered notification feed
//! - [`checkout`] - The Reviewing → Paying → Complete state machine
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic apart from
//!    explicit clock/id inputs
//! 2. **No I/O**: storage, network, and timers are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tienda_core::money::{Money, TaxRate};
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(6197); // $61.97
//!
//! // The storefront charges a flat 21% order tax
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(tienda_core::ORDER_TAX_BPS));
//! assert_eq!(tax.cents(), 1301);
//! assert_eq!((subtotal + tax).cents(), 7498); // $74.98
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod notifications;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use checkout::{Checkout, CheckoutState, OrderTotals, PaymentMethod};
pub use error::{CoreError, ValidationError};
pub use money::{Money, TaxRate};
pub use notifications::{Notification, NotificationDraft, NotificationFeed, NotificationKind};
pub use types::*;
pub use wishlist::Wishlist;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat order tax applied at checkout, in basis points (2100 = 21%).
///
/// The storefront applies a single flat rate to the whole order;
/// per-product rates do not exist in this catalog.
pub const ORDER_TAX_BPS: u32 = 2100;

/// Shipping cost in cents. Shipping is always free.
pub const SHIPPING_CENTS: i64 = 0;
