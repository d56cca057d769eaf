//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! Products and sizes are immutable once loaded from a catalog provider;
//! everything the cart needs later is captured as a snapshot at add time,
//! so a catalog refresh never rewrites history inside an open cart.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// The catalog's three top-level categories.
///
/// Serialized with the wire labels used by the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Hombre,
    Mujer,
    Accesorios,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Hombre => write!(f, "Hombre"),
            Category::Mujer => write!(f, "Mujer"),
            Category::Accesorios => write!(f, "Accesorios"),
        }
    }
}

// =============================================================================
// Size
// =============================================================================

/// A size variant of a product.
///
/// Each size carries its own price; the product's base price is only a
/// display default. Belongs to exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Display label ("S", "M", "42", "Única", ...).
    pub name: String,

    /// Price for this size, in cents. Overrides the product base price.
    pub price_cents: i64,

    /// Whether the size can currently be purchased.
    pub available: bool,
}

impl Size {
    /// Returns the size price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Immutable once loaded from a catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier. Remote catalogs use stringified numeric ids.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Base price in cents. Sizes carry the authoritative price.
    pub base_price_cents: i64,

    /// Marketing description.
    pub description: String,

    /// Image path or URL (thumbnail).
    pub image: String,

    /// Top-level category.
    pub category: Category,

    /// Ordered list of size variants.
    pub sizes: Vec<Size>,
}

impl Product {
    /// Returns the base price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Looks up a size variant by its label.
    pub fn size(&self, name: &str) -> Option<&Size> {
        self.sizes.iter().find(|s| s.name == name)
    }

    /// Returns the size variants that can currently be purchased.
    pub fn available_sizes(&self) -> impl Iterator<Item = &Size> {
        self.sizes.iter().filter(|s| s.available)
    }
}

// =============================================================================
// User
// =============================================================================

/// Role assigned to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// A shipping address attached to a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Summary of a stored payment method. Never holds real card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodSummary {
    /// Human-readable kind ("Tarjeta de crédito", "PayPal", ...).
    pub kind: String,

    /// Last digits for display, or "N/A" for wallet methods.
    pub last_digits: String,
}

/// An authenticated storefront user.
///
/// Created at login/registration, destroyed at logout. Passwords are
/// never part of this type and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub payment_method: Option<PaymentMethodSummary>,
}

impl User {
    /// Checks whether the user holds the admin role.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
