//! # Remote Catalog
//!
//! Adapter for the content API. The wire format nests images and carries
//! decimal prices; this module flattens it to the domain [`Product`]:
//!
//! - `imagen[0].formats.thumbnail.url` becomes the flat image field,
//!   falling back to a placeholder when the product has no usable image
//! - decimal `precio` becomes integer cents, here and nowhere else
//! - a size missing its availability flag counts as available
//!
//! Listings are paginated; [`RemoteCatalog::products`] walks every page.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::provider::CatalogProvider;
use tienda_core::types::{Category, Product, Size};

/// Default content API endpoint, overridable via `TIENDA_CATALOG_URL`.
const DEFAULT_CATALOG_URL: &str = "http://localhost:1337/api/productos?populate=*";

/// Image used when a product carries no thumbnail.
const PLACEHOLDER_IMAGE: &str = "/img/descarga.jpeg";

// =============================================================================
// Wire Format
// =============================================================================

#[derive(Debug, Deserialize)]
struct PageResponse {
    data: Vec<ProductDto>,
    meta: Meta,
}

#[derive(Debug, Deserialize)]
struct Meta {
    pagination: Pagination,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    page: u32,
    #[serde(rename = "pageCount")]
    page_count: u32,
}

#[derive(Debug, Deserialize)]
struct ProductDto {
    id: i64,
    nombre: String,
    precio: f64,
    #[serde(default)]
    descripcion: String,
    categoria: Category,
    #[serde(default)]
    imagen: Vec<ImageDto>,
    #[serde(default)]
    tallas: Vec<SizeDto>,
}

#[derive(Debug, Deserialize)]
struct ImageDto {
    formats: Option<Formats>,
}

#[derive(Debug, Deserialize)]
struct Formats {
    thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct SizeDto {
    nombre: String,
    precio: f64,
    /// Absent or null means the size can be purchased.
    disponible: Option<bool>,
}

// =============================================================================
// Mapping
// =============================================================================

/// Converts a decimal wire price to integer cents.
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn thumbnail_url(images: &[ImageDto]) -> String {
    images
        .first()
        .and_then(|i| i.formats.as_ref())
        .and_then(|f| f.thumbnail.as_ref())
        .map(|t| t.url.clone())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

fn map_product(dto: ProductDto) -> Product {
    Product {
        id: dto.id.to_string(),
        name: dto.nombre,
        base_price_cents: to_cents(dto.precio),
        description: dto.descripcion,
        image: thumbnail_url(&dto.imagen),
        category: dto.categoria,
        sizes: dto
            .tallas
            .into_iter()
            .map(|t| Size {
                name: t.nombre,
                price_cents: to_cents(t.precio),
                available: t.disponible.unwrap_or(true),
            })
            .collect(),
    }
}

// =============================================================================
// Remote Catalog
// =============================================================================

/// Catalog backed by the content API.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    client: reqwest::Client,
    url: String,
}

impl RemoteCatalog {
    /// A catalog against the configured endpoint (`TIENDA_CATALOG_URL`,
    /// falling back to the local default).
    pub fn new() -> Self {
        let url =
            std::env::var("TIENDA_CATALOG_URL").unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string());
        Self::with_url(url)
    }

    /// A catalog against an explicit endpoint.
    pub fn with_url(url: impl Into<String>) -> Self {
        RemoteCatalog {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn fetch_page(&self, page: u32) -> CatalogResult<PageResponse> {
        debug!(page, url = %self.url, "fetching catalog page");

        let response = self
            .client
            .get(&self.url)
            .query(&[("pagination[page]", page.to_string())])
            .send()
            .await?;

        let response = response.error_for_status().map_err(|e| {
            CatalogError::Unavailable {
                reason: e.to_string(),
            }
        })?;

        Ok(response.json::<PageResponse>().await?)
    }

    /// Walks every page of the listing.
    async fn fetch_all(&self) -> CatalogResult<Vec<ProductDto>> {
        let first = self.fetch_page(1).await?;
        let page_count = first.meta.pagination.page_count;
        let mut items = first.data;

        let mut page = first.meta.pagination.page + 1;
        while page <= page_count {
            let next = self.fetch_page(page).await?;
            items.extend(next.data);
            page += 1;
        }

        info!(products = items.len(), pages = page_count, "catalog loaded");
        Ok(items)
    }
}

impl Default for RemoteCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for RemoteCatalog {
    async fn products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.fetch_all().await?.into_iter().map(map_product).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
