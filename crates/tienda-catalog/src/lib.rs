//! # tienda-catalog: Product Catalog Providers
//!
//! The storefront reads its product listing through the
//! [`provider::CatalogProvider`] port. Two implementations ship:
//!
//! - [`fixed::StaticCatalog`] - the built-in demo listing, no I/O
//! - [`remote::RemoteCatalog`] - the content API adapter
//!
//! Prices cross this boundary exactly once: the wire format carries
//! decimal amounts, everything past the provider is integer cents.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fixed;
pub mod provider;
pub mod remote;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use fixed::StaticCatalog;
pub use provider::CatalogProvider;
pub use remote::RemoteCatalog;
