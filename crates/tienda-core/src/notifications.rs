//! # Notifications
//!
//! The ordered notification feed: typed, timestamped alerts with optional
//! expiry and deep-links.
//!
//! ## Invariants
//! - Most recent first: `add` prepends
//! - Expired notifications are pruned before the feed is exposed after a
//!   restore (`prune_expired`)
//! - `of_kind` never mutates the underlying list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Notification Kind
// =============================================================================

/// The category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A storewide or product offer.
    Offer,
    /// Something happened to a wishlisted product.
    Wishlist,
    /// A product came back in stock.
    Stock,
    /// A price went down.
    PriceDrop,
    /// Anything else.
    General,
}

// =============================================================================
// Notification
// =============================================================================

/// A single notification in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier (UUID v4), assigned by the feed.
    pub id: String,

    pub kind: NotificationKind,
    pub title: String,
    pub message: String,

    /// Product this notification is about, if any.
    pub product_id: Option<String>,

    /// Whether the user has seen it.
    pub read: bool,

    /// Assigned by the feed when added.
    pub created_at: DateTime<Utc>,

    /// Notifications past this instant are pruned on restore.
    pub expires_at: Option<DateTime<Utc>>,

    /// Discount percentage carried by offer notifications.
    pub discount: Option<u32>,

    /// Deep-link into the storefront ("/producto/1", ...).
    pub action_url: Option<String>,
}

impl Notification {
    /// Checks whether the notification is expired at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expiry) if expiry <= now)
    }
}

/// The caller-supplied part of a notification; id, timestamp, and read
/// flag are assigned by the feed.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub product_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub discount: Option<u32>,
    pub action_url: Option<String>,
}

impl NotificationDraft {
    /// Creates a draft with only the required fields set.
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        NotificationDraft {
            kind,
            title: title.into(),
            message: message.into(),
            product_id: None,
            expires_at: None,
            discount: None,
            action_url: None,
        }
    }

    /// Attaches a product id.
    pub fn product_id(mut self, id: impl Into<String>) -> Self {
        self.product_id = Some(id.into());
        self
    }

    /// Sets an expiry instant.
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Sets a discount percentage.
    pub fn discount(mut self, percent: u32) -> Self {
        self.discount = Some(percent);
        self
    }

    /// Sets a deep-link.
    pub fn action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }
}

// =============================================================================
// Notification Feed
// =============================================================================

/// The ordered list of notifications, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationFeed {
    notifications: Vec<Notification>,
}

impl NotificationFeed {
    /// Creates an empty feed.
    pub fn new() -> Self {
        NotificationFeed {
            notifications: Vec::new(),
        }
    }

    /// Restores a feed from persisted notifications, pruning entries that
    /// expired at or before `now`.
    pub fn restore(notifications: Vec<Notification>, now: DateTime<Utc>) -> Self {
        let mut feed = NotificationFeed { notifications };
        feed.prune_expired(now);
        feed
    }

    /// Materializes a draft and prepends it: a fresh UUID, the current
    /// timestamp, and the unread flag. Returns the assigned id.
    pub fn add(&mut self, draft: NotificationDraft) -> String {
        let id = format!("notif_{}", Uuid::new_v4());
        self.notifications.insert(
            0,
            Notification {
                id: id.clone(),
                kind: draft.kind,
                title: draft.title,
                message: draft.message,
                product_id: draft.product_id,
                read: false,
                created_at: Utc::now(),
                expires_at: draft.expires_at,
                discount: draft.discount,
                action_url: draft.action_url,
            },
        );
        id
    }

    /// Marks one notification read. Unknown ids are a no-op.
    /// Returns whether anything changed.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                true
            }
            _ => false,
        }
    }

    /// Marks every notification read. Returns whether anything changed.
    pub fn mark_all_read(&mut self) -> bool {
        let mut changed = false;
        for n in &mut self.notifications {
            if !n.read {
                n.read = true;
                changed = true;
            }
        }
        changed
    }

    /// Removes one notification. Unknown ids are a no-op.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    /// Removes every notification.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Discards notifications that expired at or before `now`.
    /// Returns how many were dropped.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.notifications.len();
        self.notifications.retain(|n| !n.is_expired(now));
        before - self.notifications.len()
    }

    /// The subset matching a kind, most recent first. Does not mutate.
    pub fn of_kind(&self, kind: NotificationKind) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| n.kind == kind).collect()
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// All notifications, most recent first.
    pub fn all(&self) -> &[Notification] {
        &self.notifications
    }

    /// Checks if the feed is empty.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
