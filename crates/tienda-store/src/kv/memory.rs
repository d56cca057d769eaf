//! # In-Memory Backend
//!
//! A mutex-guarded map implementing the [`KvStore`] port. Used by tests
//! and by ephemeral runs that do not want a database file.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{KvError, KvStore};

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("kv mutex poisoned").len()
    }

    /// Checks whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self
            .entries
            .lock()
            .expect("kv mutex poisoned")
            .get(key)
            .cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries
            .lock()
            .expect("kv mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        self.entries.lock().expect("kv mutex poisoned").remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let kv = MemoryKv::new();

        assert_eq!(kv.get("cart").await.unwrap(), None);

        kv.put("cart", "[]").await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap().as_deref(), Some("[]"));

        kv.put("cart", "[1]").await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap().as_deref(), Some("[1]"));

        kv.delete("cart").await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap(), None);
        assert!(kv.is_empty());
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let kv = MemoryKv::new();
        kv.delete("missing").await.unwrap();
    }
}
