//! # Wishlist Store
//!
//! The persisted wishlist service. Mutations write the full entry list
//! under the `wishlist` key; `clear` removes the key.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::keys;
use crate::kv::KvStore;
use tienda_core::types::Product;
use tienda_core::wishlist::Wishlist;

/// The persisted set of favorited products.
pub struct WishlistStore {
    wishlist: Mutex<Wishlist>,
    kv: Arc<dyn KvStore>,
}

impl WishlistStore {
    /// Restores the wishlist from storage.
    pub async fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let wishlist = match kv.get(keys::WISHLIST).await? {
            Some(blob) => match serde_json::from_str::<Vec<Product>>(&blob) {
                Ok(items) => {
                    debug!(items = items.len(), "restored wishlist");
                    Wishlist::from_items(items)
                }
                Err(error) => {
                    warn!(%error, key = keys::WISHLIST, "discarding corrupt wishlist state");
                    Wishlist::new()
                }
            },
            None => Wishlist::new(),
        };

        Ok(WishlistStore {
            wishlist: Mutex::new(wishlist),
            kv,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Wishlist> {
        self.wishlist.lock().expect("wishlist mutex poisoned")
    }

    fn snapshot_blob(wishlist: &Wishlist) -> StoreResult<String> {
        Ok(serde_json::to_string(wishlist.items())?)
    }

    /// Adds a product if absent. Returns whether it was inserted.
    pub async fn add(&self, product: Product) -> StoreResult<bool> {
        let (inserted, blob) = {
            let mut wishlist = self.lock();
            let inserted = wishlist.add(product);
            (inserted, Self::snapshot_blob(&wishlist)?)
        };

        if inserted {
            self.kv.put(keys::WISHLIST, &blob).await?;
        }
        Ok(inserted)
    }

    /// Removes a product by id. Returns whether an entry was removed.
    pub async fn remove(&self, product_id: &str) -> StoreResult<bool> {
        let (removed, blob) = {
            let mut wishlist = self.lock();
            let removed = wishlist.remove(product_id);
            (removed, Self::snapshot_blob(&wishlist)?)
        };

        if removed {
            self.kv.put(keys::WISHLIST, &blob).await?;
        }
        Ok(removed)
    }

    /// Adds the product if absent, removes it if present.
    /// Returns the resulting membership.
    pub async fn toggle(&self, product: Product) -> StoreResult<bool> {
        let product_id = product.id.clone();
        let (member, blob) = {
            let mut wishlist = self.lock();
            let member = wishlist.toggle(product);
            (member, Self::snapshot_blob(&wishlist)?)
        };

        debug!(%product_id, member, "toggled wishlist entry");
        self.kv.put(keys::WISHLIST, &blob).await?;
        Ok(member)
    }

    /// Empties the wishlist and removes the stored key.
    pub async fn clear(&self) -> StoreResult<()> {
        self.lock().clear();
        self.kv.delete(keys::WISHLIST).await?;
        Ok(())
    }

    /// Membership test by product id.
    pub fn contains(&self, product_id: &str) -> bool {
        self.lock().contains(product_id)
    }

    /// Number of favorited products.
    pub fn count(&self) -> usize {
        self.lock().count()
    }

    /// Checks if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A point-in-time copy of the entries, in insertion order.
    pub fn snapshot(&self) -> Vec<Product> {
        self.lock().items().to_vec()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::memory::MemoryKv;
    use tienda_core::types::Category;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Producto {id}"),
            base_price_cents: 1500,
            description: String::new(),
            image: "/img/descarga.jpeg".to_string(),
            category: Category::Accesorios,
            sizes: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_add_persists_entries() {
        let kv = Arc::new(MemoryKv::new());
        let store = WishlistStore::load(kv.clone()).await.unwrap();

        assert!(store.add(product("1")).await.unwrap());
        assert!(!store.add(product("1")).await.unwrap());

        let blob = kv.get(keys::WISHLIST).await.unwrap().unwrap();
        let items: Vec<Product> = serde_json::from_str(&blob).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_round_trip_restores_state() {
        let kv = Arc::new(MemoryKv::new());
        let store = WishlistStore::load(kv.clone()).await.unwrap();

        assert!(store.toggle(product("7")).await.unwrap());
        assert!(!store.toggle(product("7")).await.unwrap());
        assert!(store.is_empty());

        // Toggling back to empty persists an empty list; the key stays.
        let blob = kv.get(keys::WISHLIST).await.unwrap().unwrap();
        assert_eq!(blob, "[]");
    }

    #[tokio::test]
    async fn test_restore_across_loads() {
        let kv = Arc::new(MemoryKv::new());

        {
            let store = WishlistStore::load(kv.clone()).await.unwrap();
            store.add(product("1")).await.unwrap();
            store.add(product("2")).await.unwrap();
        }

        let store = WishlistStore::load(kv).await.unwrap();
        assert_eq!(store.count(), 2);
        assert!(store.contains("1"));
        assert!(store.contains("2"));
    }

    #[tokio::test]
    async fn test_clear_removes_key() {
        let kv = Arc::new(MemoryKv::new());
        let store = WishlistStore::load(kv.clone()).await.unwrap();

        store.add(product("1")).await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(kv.get(keys::WISHLIST).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_blob_falls_back_to_empty() {
        let kv = Arc::new(MemoryKv::new());
        kv.put(keys::WISHLIST, "not json at all").await.unwrap();

        let store = WishlistStore::load(kv).await.unwrap();
        assert!(store.is_empty());
    }
}
