//! # Wishlist
//!
//! Favorited products with set semantics keyed by product id.
//!
//! Entries are product snapshots, so a wishlisted product stays displayable
//! even if it later disappears from the catalog. Insertion order is kept
//! for display.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// A set of favorited products.
///
/// ## Invariant
/// No two entries share a product id. A persisted blob that somehow
/// contains duplicates is deduplicated on restore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    /// Creates an empty wishlist.
    pub fn new() -> Self {
        Wishlist { items: Vec::new() }
    }

    /// Restores a wishlist from persisted entries, dropping duplicate ids
    /// (first occurrence wins).
    pub fn from_items(items: Vec<Product>) -> Self {
        let mut wishlist = Wishlist::new();
        for product in items {
            wishlist.add(product);
        }
        wishlist
    }

    /// Inserts a product if absent. Returns whether it was inserted.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }

        self.items.push(product);
        true
    }

    /// Removes a product by id. Absent ids are a no-op.
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != product_id);
        self.items.len() != before
    }

    /// Adds the product if absent, removes it if present.
    /// Returns the resulting membership.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.remove(&product.id) {
            false
        } else {
            self.items.push(product);
            true
        }
    }

    /// Membership test by product id.
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    /// Empties the set.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of favorited products.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
