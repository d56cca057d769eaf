//! # Checkout Flow
//!
//! The async driver around the pure checkout state machine: it snapshots
//! the cart, simulates the payment round-trip, and clears the cart once
//! the order completes.
//!
//! Payment always succeeds. This is a demo stub standing in for a real
//! payment gateway; the fixed delay imitates its latency and is
//! injectable so tests run instantly.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::error::StoreResult;
use crate::stores::cart::CartStore;
use tienda_core::checkout::{Checkout, CheckoutState, OrderTotals, PaymentMethod};

/// Simulated payment gateway latency.
const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_secs(2);

/// A checkout in progress against a cart store.
pub struct CheckoutFlow {
    checkout: Checkout,
    cart: Arc<CartStore>,
    payment_delay: Duration,
}

impl CheckoutFlow {
    /// Starts a checkout over the cart's current contents.
    ///
    /// ## Errors
    /// Fails with `CoreError::EmptyCart` when the cart has no line items.
    pub fn begin(cart: Arc<CartStore>) -> StoreResult<Self> {
        let snapshot = cart.snapshot();
        let checkout = Checkout::for_cart(&snapshot)?;

        info!(
            subtotal_cents = checkout.totals().subtotal_cents,
            total_cents = checkout.totals().total_cents,
            "checkout started"
        );

        Ok(CheckoutFlow {
            checkout,
            cart,
            payment_delay: DEFAULT_PAYMENT_DELAY,
        })
    }

    /// Overrides the simulated gateway latency. Tests use zero.
    pub fn with_payment_delay(mut self, delay: Duration) -> Self {
        self.payment_delay = delay;
        self
    }

    /// Shopper confirmation with a chosen method: `Reviewing → Paying`.
    pub fn confirm(&mut self, method: PaymentMethod) -> StoreResult<()> {
        self.checkout.confirm(method)?;
        Ok(())
    }

    /// Runs the simulated payment and finishes the order.
    ///
    /// Waits out the gateway delay, moves to `Complete`, and clears the
    /// cart store (removing its persisted key). Returns the charged
    /// totals.
    pub async fn settle(&mut self) -> StoreResult<OrderTotals> {
        tokio::time::sleep(self.payment_delay).await;

        self.checkout.complete()?;
        self.cart.clear().await?;

        let totals = *self.checkout.totals();
        info!(total_cents = totals.total_cents, "order complete");
        Ok(totals)
    }

    /// Current state of the underlying machine.
    pub fn state(&self) -> CheckoutState {
        self.checkout.state()
    }

    /// Totals computed when the checkout started.
    pub fn totals(&self) -> &OrderTotals {
        self.checkout.totals()
    }

    /// Chosen payment method, once confirmed.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.checkout.payment_method()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use crate::kv::memory::MemoryKv;
    use crate::kv::KvStore;
    use tienda_core::types::{Category, Product, Size};

    fn shirt() -> Product {
        Product {
            id: "1".to_string(),
            name: "Camiseta Básica".to_string(),
            base_price_cents: 1999,
            description: String::new(),
            image: "/img/camiseta.jpeg".to_string(),
            category: Category::Hombre,
            sizes: vec![
                Size {
                    name: "M".to_string(),
                    price_cents: 1999,
                    available: true,
                },
                Size {
                    name: "L".to_string(),
                    price_cents: 2199,
                    available: true,
                },
            ],
        }
    }

    async fn loaded_cart(kv: Arc<MemoryKv>) -> Arc<CartStore> {
        Arc::new(CartStore::load(kv).await.unwrap())
    }

    #[tokio::test]
    async fn test_full_checkout_clears_cart() {
        let kv = Arc::new(MemoryKv::new());
        let cart = loaded_cart(kv.clone()).await;

        let product = shirt();
        let size_m = product.size("M").unwrap().clone();
        let size_l = product.size("L").unwrap().clone();
        cart.add_item(&product, &size_m).await.unwrap();
        cart.add_item(&product, &size_m).await.unwrap();
        cart.add_item(&product, &size_l).await.unwrap();

        let mut flow = CheckoutFlow::begin(cart.clone())
            .unwrap()
            .with_payment_delay(Duration::ZERO);

        assert_eq!(flow.totals().subtotal_cents, 6197);
        assert_eq!(flow.totals().total_cents, 7498);

        flow.confirm(PaymentMethod::Card).unwrap();
        let totals = flow.settle().await.unwrap();

        assert_eq!(flow.state(), CheckoutState::Complete);
        assert_eq!(totals.total_cents, 7498);
        assert!(cart.is_empty());
        assert_eq!(kv.get(keys::CART).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_cart_cannot_begin() {
        let kv = Arc::new(MemoryKv::new());
        let cart = loaded_cart(kv).await;

        assert!(CheckoutFlow::begin(cart).is_err());
    }

    #[tokio::test]
    async fn test_settle_requires_confirmation() {
        let kv = Arc::new(MemoryKv::new());
        let cart = loaded_cart(kv).await;

        let product = shirt();
        let size_m = product.size("M").unwrap().clone();
        cart.add_item(&product, &size_m).await.unwrap();

        let mut flow = CheckoutFlow::begin(cart.clone())
            .unwrap()
            .with_payment_delay(Duration::ZERO);

        assert!(flow.settle().await.is_err());
        // A failed settle leaves the cart intact.
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_totals_frozen_at_begin() {
        let kv = Arc::new(MemoryKv::new());
        let cart = loaded_cart(kv).await;

        let product = shirt();
        let size_m = product.size("M").unwrap().clone();
        cart.add_item(&product, &size_m).await.unwrap();

        let flow = CheckoutFlow::begin(cart.clone()).unwrap();
        cart.add_item(&product, &size_m).await.unwrap();

        // The extra item does not change an already-started checkout.
        assert_eq!(flow.totals().subtotal_cents, 1999);
    }
}
