//! # Static Catalog
//!
//! The built-in demo listing used when no content API is configured.
//! Ids and names line up with the seeded demo notifications, so offers
//! deep-link to products that exist.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::provider::CatalogProvider;
use tienda_core::types::{Category, Product, Size};

fn size(name: &str, price_cents: i64) -> Size {
    Size {
        name: name.to_string(),
        price_cents,
        available: true,
    }
}

fn demo_listing() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Camiseta Básica".to_string(),
            base_price_cents: 1999,
            description: "Camiseta de algodón 100%, corte clásico.".to_string(),
            image: "/img/camiseta.jpeg".to_string(),
            category: Category::Hombre,
            sizes: vec![
                size("S", 1899),
                size("M", 1999),
                size("L", 2199),
                Size {
                    name: "XL".to_string(),
                    price_cents: 2299,
                    available: false,
                },
            ],
        },
        Product {
            id: "2".to_string(),
            name: "Pantalón Vaquero".to_string(),
            base_price_cents: 4999,
            description: "Vaquero recto de tiro medio.".to_string(),
            image: "/img/vaquero.jpeg".to_string(),
            category: Category::Hombre,
            sizes: vec![size("38", 4999), size("40", 4999), size("42", 5199)],
        },
        Product {
            id: "3".to_string(),
            name: "Vestido Floral".to_string(),
            base_price_cents: 3999,
            description: "Vestido midi con estampado floral.".to_string(),
            image: "/img/vestido.jpeg".to_string(),
            category: Category::Mujer,
            sizes: vec![size("S", 3999), size("M", 3999), size("L", 4199)],
        },
        Product {
            id: "4".to_string(),
            name: "Blusa de Seda".to_string(),
            base_price_cents: 3499,
            description: "Blusa ligera de manga larga.".to_string(),
            image: "/img/blusa.jpeg".to_string(),
            category: Category::Mujer,
            sizes: vec![size("S", 3499), size("M", 3499)],
        },
        Product {
            id: "5".to_string(),
            name: "Sudadera con Capucha".to_string(),
            base_price_cents: 2999,
            description: "Sudadera con capucha y bolsillo canguro.".to_string(),
            image: "/img/sudadera.jpeg".to_string(),
            category: Category::Hombre,
            sizes: vec![size("M", 2999), size("L", 2999), size("XL", 3199)],
        },
        Product {
            id: "6".to_string(),
            name: "Gorra Clásica".to_string(),
            base_price_cents: 1299,
            description: "Gorra ajustable de sarga.".to_string(),
            image: "/img/gorra.jpeg".to_string(),
            category: Category::Accesorios,
            sizes: vec![size("Única", 1299)],
        },
    ]
}

/// In-memory catalog with the demo listing.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// The demo listing.
    pub fn new() -> Self {
        StaticCatalog {
            products: demo_listing(),
        }
    }

    /// A catalog over caller-supplied products. Used by tests.
    pub fn with_products(products: Vec<Product>) -> Self {
        StaticCatalog { products }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
