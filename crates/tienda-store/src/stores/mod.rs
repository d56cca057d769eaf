//! # Persisted Stores
//!
//! One service per slice of durable state. Each store restores itself
//! from its storage key at construction (discarding corrupt blobs with a
//! logged warning), mutates in memory under a mutex, and re-persists the
//! relevant snapshot after every mutation.

pub mod cart;
pub mod notifications;
pub mod preferences;
pub mod session;
pub mod wishlist;
