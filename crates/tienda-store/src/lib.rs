//! # tienda-store: Durable State Layer for the tienda Storefront
//!
//! The web client keeps this state in browser local storage behind ambient
//! context providers. Here each store is an explicit service constructed
//! at application start against a [`kv::KvStore`] port, so the logic is
//! testable without any browser environment.
//!
//! ## Module Organization
//!
//! - [`kv`] - The key-value persistence port and its backends
//! - [`keys`] - The storage keys (byte-identical to the web client's)
//! - [`config`] - Storage configuration
//! - [`stores`] - Cart, wishlist, notification, session, and preference stores
//! - [`checkout`] - The async checkout driver
//! - [`seed`] - One-shot demo notification seeding
//! - [`error`] - Store error types
//!
//! ## Concurrency
//!
//! Mutations are synchronous under a per-store mutex; the serialized
//! snapshot is written to storage after the lock is released, so no lock
//! is ever held across an await.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tienda_store::config::StorageConfig;
//! use tienda_store::kv::sqlite::SqliteKv;
//! use tienda_store::stores::cart::CartStore;
//!
//! let kv = Arc::new(SqliteKv::open(StorageConfig::default()).await?);
//! let cart = CartStore::load(kv.clone()).await?;
//! cart.add_item(&product, &size).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod keys;
pub mod kv;
pub mod seed;
pub mod stores;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::CheckoutFlow;
pub use config::StorageConfig;
pub use error::{StoreError, StoreResult};
pub use kv::memory::MemoryKv;
pub use kv::sqlite::SqliteKv;
pub use kv::KvStore;
pub use seed::{run_initial_seed, SeedSchedule};
pub use stores::cart::CartStore;
pub use stores::notifications::NotificationStore;
pub use stores::preferences::PreferencesStore;
pub use stores::session::SessionStore;
pub use stores::wishlist::WishlistStore;
