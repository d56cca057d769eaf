//! # Notification Seeding
//!
//! One-shot demo notifications emitted the first time the storefront
//! starts: three staggered product offers, then a price drop for a random
//! wishlisted product. A persisted flag makes the seeding run at most
//! once across loads.
//!
//! The flag is written before the first notification, so a crash mid-seed
//! never causes duplicate offers on the next start.

use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::keys;
use crate::kv::KvStore;
use crate::stores::notifications::NotificationStore;
use crate::stores::wishlist::WishlistStore;
use tienda_core::notifications::{NotificationDraft, NotificationKind};

/// Offer targets: product id, display name, discount percentage.
const SEED_OFFERS: [(&str, &str, u32); 3] = [
    ("1", "Camiseta Básica", 20),
    ("3", "Vestido Floral", 30),
    ("5", "Sudadera con Capucha", 25),
];

/// Offers expire a day after they are emitted.
const OFFER_TTL_HOURS: i64 = 24;

/// Timing of the seeded notifications.
#[derive(Debug, Clone, Copy)]
pub struct SeedSchedule {
    /// Pause between consecutive offers.
    pub stagger: Duration,

    /// Pause before the wishlist price drop.
    pub price_drop_delay: Duration,
}

impl Default for SeedSchedule {
    fn default() -> Self {
        SeedSchedule {
            stagger: Duration::from_secs(5),
            price_drop_delay: Duration::from_secs(10),
        }
    }
}

impl SeedSchedule {
    /// A schedule with no delays, for tests.
    pub fn immediate() -> Self {
        SeedSchedule {
            stagger: Duration::ZERO,
            price_drop_delay: Duration::ZERO,
        }
    }
}

/// Emits the first-start demo notifications.
///
/// Returns whether seeding ran; a previous run (recorded under the
/// `hasGeneratedInitialNotifications` key) makes this a no-op.
pub async fn run_initial_seed(
    kv: &dyn KvStore,
    notifications: &NotificationStore,
    wishlist: &WishlistStore,
    schedule: SeedSchedule,
) -> StoreResult<bool> {
    if kv.get(keys::SEEDED).await?.is_some() {
        debug!("initial notifications already seeded");
        return Ok(false);
    }
    kv.put(keys::SEEDED, "true").await?;

    info!("seeding initial notifications");

    for (index, (product_id, name, discount)) in SEED_OFFERS.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(schedule.stagger).await;
        }

        let draft = NotificationDraft::new(
            NotificationKind::Offer,
            "¡Oferta especial!",
            format!("{discount}% de descuento en {name}"),
        )
        .product_id(*product_id)
        .discount(*discount)
        .expires_at(Utc::now() + ChronoDuration::hours(OFFER_TTL_HOURS))
        .action_url(format!("/producto/{product_id}"));

        notifications.add(draft).await?;
    }

    tokio::time::sleep(schedule.price_drop_delay).await;

    let picked = {
        let items = wishlist.snapshot();
        items
            .choose(&mut rand::rng())
            .map(|p| (p.id.clone(), p.name.clone()))
    };
    if let Some((product_id, name)) = picked {
        let draft = NotificationDraft::new(
            NotificationKind::PriceDrop,
            "¡Precio reducido!",
            format!("El precio de {name} ha bajado"),
        )
        .product_id(product_id.clone())
        .action_url(format!("/producto/{product_id}"));

        notifications.add(draft).await?;
    }

    Ok(true)
}

// =============================================================================
// Unit Tests
// =============================================================================
