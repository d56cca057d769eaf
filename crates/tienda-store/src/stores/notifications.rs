//! # Notification Store
//!
//! The persisted notification feed. Expired entries are pruned on load,
//! every mutation re-persists the full feed, and `clear` removes the
//! `notifications` key.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::keys;
use crate::kv::KvStore;
use tienda_core::notifications::{
    Notification, NotificationDraft, NotificationFeed, NotificationKind,
};

/// The persisted notification feed.
pub struct NotificationStore {
    feed: Mutex<NotificationFeed>,
    kv: Arc<dyn KvStore>,
}

impl NotificationStore {
    /// Restores the feed from storage, pruning notifications that have
    /// already expired. The pruned feed is written back so the stored
    /// blob does not keep dead entries.
    pub async fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let (feed, pruned) = match kv.get(keys::NOTIFICATIONS).await? {
            Some(blob) => match serde_json::from_str::<Vec<Notification>>(&blob) {
                Ok(entries) => {
                    let before = entries.len();
                    let feed = NotificationFeed::restore(entries, Utc::now());
                    let pruned = before - feed.len();
                    debug!(restored = feed.len(), pruned, "restored notifications");
                    (feed, pruned > 0)
                }
                Err(error) => {
                    warn!(
                        %error,
                        key = keys::NOTIFICATIONS,
                        "discarding corrupt notification state"
                    );
                    (NotificationFeed::new(), false)
                }
            },
            None => (NotificationFeed::new(), false),
        };

        let store = NotificationStore {
            feed: Mutex::new(feed),
            kv,
        };
        if pruned {
            let blob = Self::snapshot_blob(&store.lock())?;
            store.persist(blob).await?;
        }
        Ok(store)
    }

    fn lock(&self) -> MutexGuard<'_, NotificationFeed> {
        self.feed.lock().expect("notification mutex poisoned")
    }

    fn snapshot_blob(feed: &NotificationFeed) -> StoreResult<Option<String>> {
        if feed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(serde_json::to_string(feed.all())?))
        }
    }

    async fn persist(&self, blob: Option<String>) -> StoreResult<()> {
        match blob {
            Some(json) => self.kv.put(keys::NOTIFICATIONS, &json).await?,
            None => self.kv.delete(keys::NOTIFICATIONS).await?,
        }
        Ok(())
    }

    /// Adds a notification to the front of the feed. Returns its id.
    pub async fn add(&self, draft: NotificationDraft) -> StoreResult<String> {
        let (id, blob) = {
            let mut feed = self.lock();
            let id = feed.add(draft);
            (id, Self::snapshot_blob(&feed)?)
        };

        debug!(%id, "added notification");
        self.persist(blob).await?;
        Ok(id)
    }

    /// Marks one notification read. Unknown ids are a no-op.
    pub async fn mark_read(&self, id: &str) -> StoreResult<bool> {
        let (changed, blob) = {
            let mut feed = self.lock();
            let changed = feed.mark_read(id);
            (changed, Self::snapshot_blob(&feed)?)
        };

        if changed {
            self.persist(blob).await?;
        }
        Ok(changed)
    }

    /// Marks every notification read.
    pub async fn mark_all_read(&self) -> StoreResult<bool> {
        let (changed, blob) = {
            let mut feed = self.lock();
            let changed = feed.mark_all_read();
            (changed, Self::snapshot_blob(&feed)?)
        };

        if changed {
            self.persist(blob).await?;
        }
        Ok(changed)
    }

    /// Removes one notification. Unknown ids are a no-op.
    pub async fn remove(&self, id: &str) -> StoreResult<bool> {
        let (removed, blob) = {
            let mut feed = self.lock();
            let removed = feed.remove(id);
            (removed, Self::snapshot_blob(&feed)?)
        };

        if removed {
            self.persist(blob).await?;
        }
        Ok(removed)
    }

    /// Removes every notification and the stored key.
    pub async fn clear(&self) -> StoreResult<()> {
        self.lock().clear();
        self.kv.delete(keys::NOTIFICATIONS).await?;
        Ok(())
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.lock().unread_count()
    }

    /// A point-in-time copy of the feed, most recent first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().all().to_vec()
    }

    /// The subset matching a kind, most recent first.
    pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.lock().of_kind(kind).into_iter().cloned().collect()
    }

    /// Checks if the feed is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::memory::MemoryKv;
    use chrono::Duration;

    fn offer(title: &str) -> NotificationDraft {
        NotificationDraft::new(NotificationKind::Offer, title, "descuento especial")
    }

    #[tokio::test]
    async fn test_add_persists_feed() {
        let kv = Arc::new(MemoryKv::new());
        let store = NotificationStore::load(kv.clone()).await.unwrap();

        let id = store.add(offer("oferta")).await.unwrap();
        assert!(id.starts_with("notif_"));

        let blob = kv.get(keys::NOTIFICATIONS).await.unwrap().unwrap();
        let entries: Vec<Notification> = serde_json::from_str(&blob).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].read);
    }

    #[tokio::test]
    async fn test_mark_read_survives_reload() {
        let kv = Arc::new(MemoryKv::new());
        let id = {
            let store = NotificationStore::load(kv.clone()).await.unwrap();
            let id = store.add(offer("oferta")).await.unwrap();
            assert!(store.mark_read(&id).await.unwrap());
            id
        };

        let store = NotificationStore::load(kv).await.unwrap();
        assert_eq!(store.unread_count(), 0);
        assert_eq!(store.snapshot()[0].id, id);
    }

    #[tokio::test]
    async fn test_expired_entries_pruned_on_load() {
        let kv = Arc::new(MemoryKv::new());
        {
            let store = NotificationStore::load(kv.clone()).await.unwrap();
            store
                .add(offer("caducada").expires_at(Utc::now() - Duration::hours(1)))
                .await
                .unwrap();
            store.add(offer("vigente")).await.unwrap();
        }

        let store = NotificationStore::load(kv.clone()).await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0].title, "vigente");

        // The pruned feed is written back.
        let blob = kv.get(keys::NOTIFICATIONS).await.unwrap().unwrap();
        let entries: Vec<Notification> = serde_json::from_str(&blob).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_removing_last_entry_clears_key() {
        let kv = Arc::new(MemoryKv::new());
        let store = NotificationStore::load(kv.clone()).await.unwrap();

        let id = store.add(offer("oferta")).await.unwrap();
        assert!(store.remove(&id).await.unwrap());

        assert_eq!(kv.get(keys::NOTIFICATIONS).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_removes_key() {
        let kv = Arc::new(MemoryKv::new());
        let store = NotificationStore::load(kv.clone()).await.unwrap();

        store.add(offer("a")).await.unwrap();
        store.add(offer("b")).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.is_empty());
        assert_eq!(kv.get(keys::NOTIFICATIONS).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_blob_falls_back_to_empty() {
        let kv = Arc::new(MemoryKv::new());
        kv.put(keys::NOTIFICATIONS, "[{broken").await.unwrap();

        let store = NotificationStore::load(kv).await.unwrap();
        assert!(store.is_empty());
    }
}
