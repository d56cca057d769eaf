//! # Cart
//!
//! The pure shopping cart: line items keyed by (product id, size name),
//! with derived totals.
//!
//! ## Invariants
//! - Line items are unique by (product id, size name); adding an existing
//!   key increments its quantity instead of duplicating
//! - Quantity is always ≥ 1
//! - `total_items` / `total_price` are recomputed from the item list on
//!   every call; they are never stored state that could drift

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, Size};
use crate::validation::validate_quantity;

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the cart.
///
/// Holds a snapshot of the product and chosen size taken at add time, not a
/// live reference. If the catalog later changes a price, open carts keep the
/// price the shopper saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID at time of adding (frozen).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub product_name: String,

    /// Product image at time of adding (frozen).
    pub image: String,

    /// Size label at time of adding (frozen).
    pub size_name: String,

    /// Size price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart. Always ≥ 1.
    pub quantity: u32,

    /// When this item was added to the cart.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new line item from a product and a chosen size, with
    /// quantity 1.
    pub fn snapshot(product: &Product, size: &Size) -> Self {
        CartItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            image: product.image.clone(),
            size_name: size.name.clone(),
            unit_price_cents: size.price_cents,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Line total (frozen unit price × quantity).
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Line items, in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Restores a cart from persisted line items.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    /// Adds a product in a chosen size.
    ///
    /// ## Behavior
    /// - Existing (product id, size name) key: quantity is incremented by 1
    /// - New key: a snapshot line item is appended with quantity 1
    pub fn add_item(&mut self, product: &Product, size: &Size) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id && i.size_name == size.name)
        {
            item.quantity += 1;
            return;
        }

        self.items.push(CartItem::snapshot(product, size));
    }

    /// Removes the line item at the given position.
    ///
    /// An out-of-range index is a silent no-op. Returns whether an item
    /// was removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }

        self.items.remove(index);
        true
    }

    /// Sets the quantity of the line item at the given position.
    ///
    /// ## Errors
    /// - `ValidationError::InvalidQuantity` for quantities below 1; the
    ///   cart is left unchanged
    /// - `CoreError::LineItemOutOfRange` when the index does not exist
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        let quantity = validate_quantity(quantity)?;

        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CoreError::LineItemOutOfRange { index, len })?;

        item.quantity = quantity;
        Ok(())
    }

    /// Empties all line items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of line items (unique keys).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all line items.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of quantity × frozen size price over all line items.
    ///
    /// Never negative: quantities are ≥ 1 and snapshot prices come from a
    /// catalog that carries no negative prices.
    pub fn total_price(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_total())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
