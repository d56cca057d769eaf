//! # Storage Keys
//!
//! String keys for the persisted JSON blobs. Kept byte-identical to the
//! keys the web client uses in browser local storage, so a dump
//! of old state remains readable.
//!
//! There is no schema versioning on these blobs; a blob that no longer
//! parses is discarded with a logged warning and the store falls back to
//! its default state.

/// The authenticated user (password-less profile).
pub const USER: &str = "user";

/// The cart's line items. Absent when the cart is empty.
pub const CART: &str = "cart";

/// The wishlist's product snapshots.
pub const WISHLIST: &str = "wishlist";

/// The notification feed, most recent first.
pub const NOTIFICATIONS: &str = "notifications";

/// Dark mode flag.
pub const DARK_MODE: &str = "darkMode";

/// Saved product browsing filters.
pub const PRODUCT_FILTERS: &str = "productFilters";

/// Notification delivery preferences.
pub const NOTIFICATION_PREFERENCES: &str = "notificationPreferences";

/// One-shot guard for the demo notification seeder.
pub const SEEDED: &str = "hasGeneratedInitialNotifications";
