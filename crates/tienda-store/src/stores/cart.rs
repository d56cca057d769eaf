//! # Cart Store
//!
//! The persisted shopping cart service.
//!
//! ## Persistence Contract
//! - Every mutation that leaves at least one line item writes the full
//!   item list under the `cart` key
//! - A mutation that empties the cart (and `clear`) removes the key
//!   entirely, so an empty cart never lingers in storage
//! - A corrupt persisted blob falls back to an empty cart with a warning

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::keys;
use crate::kv::KvStore;
use tienda_core::cart::{Cart, CartItem};
use tienda_core::money::Money;
use tienda_core::types::{Product, Size};

/// The persisted shopping cart.
pub struct CartStore {
    cart: Mutex<Cart>,
    kv: Arc<dyn KvStore>,
}

impl CartStore {
    /// Restores the cart from storage.
    pub async fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let cart = match kv.get(keys::CART).await? {
            Some(blob) => match serde_json::from_str::<Vec<CartItem>>(&blob) {
                Ok(items) => {
                    debug!(items = items.len(), "restored cart");
                    Cart::from_items(items)
                }
                Err(error) => {
                    warn!(%error, key = keys::CART, "discarding corrupt cart state");
                    Cart::new()
                }
            },
            None => Cart::new(),
        };

        Ok(CartStore {
            cart: Mutex::new(cart),
            kv,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().expect("cart mutex poisoned")
    }

    /// Serialized item list, or `None` when the cart is empty and the
    /// stored key should be removed instead.
    fn snapshot_blob(cart: &Cart) -> StoreResult<Option<String>> {
        if cart.is_empty() {
            Ok(None)
        } else {
            Ok(Some(serde_json::to_string(&cart.items)?))
        }
    }

    async fn persist(&self, blob: Option<String>) -> StoreResult<()> {
        match blob {
            Some(json) => self.kv.put(keys::CART, &json).await?,
            None => self.kv.delete(keys::CART).await?,
        }
        Ok(())
    }

    /// Adds a product in a chosen size; an existing (product, size) line
    /// item has its quantity incremented by 1.
    pub async fn add_item(&self, product: &Product, size: &Size) -> StoreResult<()> {
        let blob = {
            let mut cart = self.lock();
            cart.add_item(product, size);
            Self::snapshot_blob(&cart)?
        };

        debug!(product_id = %product.id, size = %size.name, "added to cart");
        self.persist(blob).await
    }

    /// Removes the line item at `index`. Out-of-range is a silent no-op
    /// that touches neither memory nor storage. Returns whether an item
    /// was removed.
    pub async fn remove_item(&self, index: usize) -> StoreResult<bool> {
        let (removed, blob) = {
            let mut cart = self.lock();
            let removed = cart.remove_item(index);
            (removed, Self::snapshot_blob(&cart)?)
        };

        if removed {
            self.persist(blob).await?;
        }
        Ok(removed)
    }

    /// Sets the quantity of the line item at `index`.
    ///
    /// Quantities below 1 are rejected with a validation error and leave
    /// both memory and storage untouched.
    pub async fn update_quantity(&self, index: usize, quantity: i64) -> StoreResult<()> {
        let blob = {
            let mut cart = self.lock();
            cart.update_quantity(index, quantity)?;
            Self::snapshot_blob(&cart)?
        };

        self.persist(blob).await
    }

    /// Empties the cart and removes the stored key.
    pub async fn clear(&self) -> StoreResult<()> {
        self.lock().clear();
        debug!("cart cleared");
        self.kv.delete(keys::CART).await?;
        Ok(())
    }

    /// A point-in-time copy of the cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Total quantity across all line items.
    pub fn total_items(&self) -> u32 {
        self.lock().total_items()
    }

    /// Sum of quantity × frozen size price.
    pub fn total_price(&self) -> Money {
        self.lock().total_price()
    }

    /// Checks if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
