//! The catalog provider port.

use async_trait::async_trait;

use crate::error::CatalogResult;
use tienda_core::types::Product;

/// Source of the product listing.
///
/// Implementations must be shareable across tasks; callers typically hold
/// an `Arc<dyn CatalogProvider>`.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// The full product listing, in catalog order.
    async fn products(&self) -> CatalogResult<Vec<Product>>;

    /// One product by id, if the catalog has it.
    async fn product(&self, id: &str) -> CatalogResult<Option<Product>> {
        Ok(self.products().await?.into_iter().find(|p| p.id == id))
    }
}
