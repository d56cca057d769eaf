//! # Preferences Store
//!
//! User-scoped presentation settings: the dark-mode flag, the product
//! listing filters, and the per-channel notification preferences. Each
//! lives under its own storage key and is written on every mutation.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreResult;
use crate::keys;
use crate::kv::KvStore;
use tienda_core::types::{Category, Product};

// =============================================================================
// Product Filters
// =============================================================================

/// Listing sort order, serialized with the wire labels the storefront
/// select control uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "nombre-asc")]
    NameAsc,
    #[serde(rename = "nombre-desc")]
    NameDesc,
    #[serde(rename = "precio-asc")]
    PriceAsc,
    #[serde(rename = "precio-desc")]
    PriceDesc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::NameAsc
    }
}

/// Filters applied to the product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFilters {
    /// Restrict to one category, or show everything.
    pub category: Option<Category>,

    /// Price range in cents, inclusive on both ends.
    pub price_min_cents: i64,
    pub price_max_cents: i64,

    /// Size labels that must be offered by a matching product.
    /// Empty means no size restriction.
    pub sizes: Vec<String>,

    pub sort: SortOrder,
}

impl Default for ProductFilters {
    fn default() -> Self {
        ProductFilters {
            category: None,
            price_min_cents: 0,
            price_max_cents: 100_000,
            sizes: Vec::new(),
            sort: SortOrder::default(),
        }
    }
}

impl ProductFilters {
    /// Checks whether a product passes the filters.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }

        if product.base_price_cents < self.price_min_cents
            || product.base_price_cents > self.price_max_cents
        {
            return false;
        }

        if !self.sizes.is_empty()
            && !self
                .sizes
                .iter()
                .any(|wanted| product.sizes.iter().any(|s| &s.name == wanted))
        {
            return false;
        }

        true
    }

    /// Filters and sorts a product listing.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortOrder::NameAsc => matched.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::NameDesc => matched.sort_by(|a, b| b.name.cmp(&a.name)),
            SortOrder::PriceAsc => {
                matched.sort_by_key(|p| p.base_price_cents);
            }
            SortOrder::PriceDesc => {
                matched.sort_by_key(|p| std::cmp::Reverse(p.base_price_cents));
            }
        }

        matched
    }
}

// =============================================================================
// Notification Preferences
// =============================================================================

/// Per-channel and per-kind notification opt-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub offers: bool,
    pub price_drops: bool,
    pub stock_alerts: bool,
    pub wishlist_updates: bool,
    pub general_updates: bool,
    pub email: bool,
    pub push: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        NotificationPreferences {
            offers: true,
            price_drops: true,
            stock_alerts: true,
            wishlist_updates: true,
            general_updates: false,
            email: false,
            push: true,
        }
    }
}

// =============================================================================
// Preferences Store
// =============================================================================

/// The persisted preference set.
pub struct PreferencesStore {
    dark_mode: Mutex<bool>,
    filters: Mutex<ProductFilters>,
    notifications: Mutex<NotificationPreferences>,
    kv: Arc<dyn KvStore>,
}

impl PreferencesStore {
    /// Restores all three preference slices from storage, falling back to
    /// the defaults for missing or corrupt blobs.
    pub async fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let dark_mode = Self::restore(&kv, keys::DARK_MODE).await?.unwrap_or(false);
        let filters = Self::restore(&kv, keys::PRODUCT_FILTERS)
            .await?
            .unwrap_or_default();
        let notifications = Self::restore(&kv, keys::NOTIFICATION_PREFERENCES)
            .await?
            .unwrap_or_default();

        Ok(PreferencesStore {
            dark_mode: Mutex::new(dark_mode),
            filters: Mutex::new(filters),
            notifications: Mutex::new(notifications),
            kv,
        })
    }

    async fn restore<T: serde::de::DeserializeOwned>(
        kv: &Arc<dyn KvStore>,
        key: &str,
    ) -> StoreResult<Option<T>> {
        match kv.get(key).await? {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(value) => Ok(Some(value)),
                Err(error) => {
                    warn!(%error, key, "discarding corrupt preference state");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    fn lock<'a, T>(mutex: &'a Mutex<T>) -> MutexGuard<'a, T> {
        mutex.lock().expect("preferences mutex poisoned")
    }

    /// Whether the dark theme is active.
    pub fn dark_mode(&self) -> bool {
        *Self::lock(&self.dark_mode)
    }

    /// Sets the dark-mode flag and persists it.
    pub async fn set_dark_mode(&self, enabled: bool) -> StoreResult<()> {
        *Self::lock(&self.dark_mode) = enabled;
        let blob = serde_json::to_string(&enabled)?;
        self.kv.put(keys::DARK_MODE, &blob).await?;
        Ok(())
    }

    /// Flips the dark-mode flag. Returns the new value.
    pub async fn toggle_dark_mode(&self) -> StoreResult<bool> {
        let enabled = !self.dark_mode();
        self.set_dark_mode(enabled).await?;
        Ok(enabled)
    }

    /// The current listing filters.
    pub fn filters(&self) -> ProductFilters {
        Self::lock(&self.filters).clone()
    }

    /// Replaces the listing filters and persists them.
    pub async fn set_filters(&self, filters: ProductFilters) -> StoreResult<()> {
        let blob = serde_json::to_string(&filters)?;
        *Self::lock(&self.filters) = filters;
        self.kv.put(keys::PRODUCT_FILTERS, &blob).await?;
        Ok(())
    }

    /// Resets the listing filters to their defaults and persists them.
    pub async fn reset_filters(&self) -> StoreResult<()> {
        self.set_filters(ProductFilters::default()).await
    }

    /// The current notification preferences.
    pub fn notification_preferences(&self) -> NotificationPreferences {
        *Self::lock(&self.notifications)
    }

    /// Replaces the notification preferences and persists them.
    pub async fn set_notification_preferences(
        &self,
        prefs: NotificationPreferences,
    ) -> StoreResult<()> {
        *Self::lock(&self.notifications) = prefs;
        let blob = serde_json::to_string(&prefs)?;
        self.kv.put(keys::NOTIFICATION_PREFERENCES, &blob).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::memory::MemoryKv;
    use tienda_core::types::Size;

    fn product(id: &str, name: &str, cents: i64, category: Category) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            base_price_cents: cents,
            description: String::new(),
            image: "/img/descarga.jpeg".to_string(),
            category,
            sizes: vec![Size {
                name: "M".to_string(),
                price_cents: cents,
                available: true,
            }],
        }
    }

    #[test]
    fn test_sort_order_wire_labels() {
        assert_eq!(
            serde_json::to_string(&SortOrder::PriceDesc).unwrap(),
            "\"precio-desc\""
        );
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"nombre-asc\"").unwrap(),
            SortOrder::NameAsc
        );
    }

    #[test]
    fn test_filters_apply() {
        let listing = vec![
            product("1", "Camiseta Básica", 1999, Category::Hombre),
            product("2", "Vestido Floral", 3999, Category::Mujer),
            product("3", "Gorra", 1299, Category::Accesorios),
        ];

        let mut filters = ProductFilters::default();
        filters.sort = SortOrder::PriceDesc;
        let all = filters.apply(&listing);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Vestido Floral");

        filters.category = Some(Category::Hombre);
        let hombre = filters.apply(&listing);
        assert_eq!(hombre.len(), 1);
        assert_eq!(hombre[0].id, "1");

        filters.category = None;
        filters.price_max_cents = 1500;
        let cheap = filters.apply(&listing);
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].name, "Gorra");
    }

    #[test]
    fn test_filters_size_restriction() {
        let mut with_l = product("1", "Camiseta Básica", 1999, Category::Hombre);
        with_l.sizes.push(Size {
            name: "L".to_string(),
            price_cents: 2199,
            available: true,
        });
        let listing = vec![with_l, product("2", "Gorra", 1299, Category::Accesorios)];

        let mut filters = ProductFilters::default();
        filters.sizes = vec!["L".to_string()];
        let matched = filters.apply(&listing);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "1");
    }

    #[test]
    fn test_default_notification_preferences() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.offers && prefs.price_drops && prefs.stock_alerts);
        assert!(prefs.wishlist_updates && prefs.push);
        assert!(!prefs.general_updates && !prefs.email);
    }

    #[tokio::test]
    async fn test_dark_mode_round_trip() {
        let kv = Arc::new(MemoryKv::new());
        {
            let prefs = PreferencesStore::load(kv.clone()).await.unwrap();
            assert!(!prefs.dark_mode());
            assert!(prefs.toggle_dark_mode().await.unwrap());
        }

        let prefs = PreferencesStore::load(kv.clone()).await.unwrap();
        assert!(prefs.dark_mode());
        assert_eq!(
            kv.get(keys::DARK_MODE).await.unwrap().as_deref(),
            Some("true")
        );
    }

    #[tokio::test]
    async fn test_filters_persist_across_loads() {
        let kv = Arc::new(MemoryKv::new());
        {
            let prefs = PreferencesStore::load(kv.clone()).await.unwrap();
            let mut filters = ProductFilters::default();
            filters.category = Some(Category::Mujer);
            filters.sort = SortOrder::PriceAsc;
            prefs.set_filters(filters).await.unwrap();
        }

        let prefs = PreferencesStore::load(kv).await.unwrap();
        assert_eq!(prefs.filters().category, Some(Category::Mujer));
        assert_eq!(prefs.filters().sort, SortOrder::PriceAsc);
    }

    #[tokio::test]
    async fn test_corrupt_blob_falls_back_to_defaults() {
        let kv = Arc::new(MemoryKv::new());
        kv.put(keys::PRODUCT_FILTERS, "{{{{").await.unwrap();

        let prefs = PreferencesStore::load(kv).await.unwrap();
        assert_eq!(prefs.filters(), ProductFilters::default());
    }
}
