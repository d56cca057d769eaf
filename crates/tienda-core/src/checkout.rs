//! # Checkout
//!
//! The pure checkout state machine: `Reviewing → Paying → Complete`.
//!
//! There is no transition from `Paying` back to `Reviewing`; the storefront
//! has no cancellation path once payment starts, and attempts are rejected
//! with a typed `InvalidTransition` error.
//!
//! Timers, payment simulation, and cart clearing are driven by
//! `tienda-store`; this module only owns totals and transitions.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::{Money, TaxRate};
use crate::{ORDER_TAX_BPS, SHIPPING_CENTS};

// =============================================================================
// Payment Method
// =============================================================================

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// External wallet.
    Paypal,
}

// =============================================================================
// Order Totals
// =============================================================================

/// Totals shown while reviewing and charged at payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

impl OrderTotals {
    /// Computes totals from a cart subtotal: flat 21% tax, free shipping.
    pub fn from_subtotal(subtotal: Money) -> Self {
        let tax = subtotal.calculate_tax(TaxRate::from_bps(ORDER_TAX_BPS));
        let total = subtotal + tax + Money::from_cents(SHIPPING_CENTS);

        OrderTotals {
            subtotal_cents: subtotal.cents(),
            tax_cents: tax.cents(),
            shipping_cents: SHIPPING_CENTS,
            total_cents: total.cents(),
        }
    }

    /// The amount to charge, as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Checkout State Machine
// =============================================================================

/// Where the checkout currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    /// Totals are displayed; the shopper has not committed yet.
    Reviewing,
    /// Payment has been initiated with a chosen method.
    Paying,
    /// Payment finished; the cart is to be cleared.
    Complete,
}

impl CheckoutState {
    const fn label(self) -> &'static str {
        match self {
            CheckoutState::Reviewing => "reviewing",
            CheckoutState::Paying => "paying",
            CheckoutState::Complete => "complete",
        }
    }
}

/// A checkout in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    state: CheckoutState,
    totals: OrderTotals,
    payment_method: Option<PaymentMethod>,
}

impl Checkout {
    /// Starts a checkout for the given cart, in `Reviewing`.
    ///
    /// ## Errors
    /// `CoreError::EmptyCart` when the cart has no line items.
    pub fn for_cart(cart: &Cart) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(Checkout {
            state: CheckoutState::Reviewing,
            totals: OrderTotals::from_subtotal(cart.total_price()),
            payment_method: None,
        })
    }

    /// Shopper confirmation: `Reviewing → Paying` with a chosen method.
    pub fn confirm(&mut self, method: PaymentMethod) -> CoreResult<()> {
        if self.state != CheckoutState::Reviewing {
            return Err(CoreError::InvalidTransition {
                state: self.state.label(),
                action: "confirm",
            });
        }

        self.payment_method = Some(method);
        self.state = CheckoutState::Paying;
        Ok(())
    }

    /// Payment settled: `Paying → Complete`.
    pub fn complete(&mut self) -> CoreResult<()> {
        if self.state != CheckoutState::Paying {
            return Err(CoreError::InvalidTransition {
                state: self.state.label(),
                action: "complete",
            });
        }

        self.state = CheckoutState::Complete;
        Ok(())
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Totals computed when the checkout started.
    #[inline]
    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// Chosen payment method, once confirmed.
    #[inline]
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Product, Size};

    fn cart_with_reference_order() -> Cart {
        let product = Product {
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
        };

        let mut cart = Cart::new();
        let size_m = product.size("M").unwrap().clone();
        let size_l = product.size("L").unwrap().clone();
        cart.add_item(&product, &size_m);
        cart.add_item(&product, &size_m);
        cart.add_item(&product, &size_l);
        cart
    }

    #[test]
    fn test_totals_flat_tax_free_shipping() {
        let cart = cart_with_reference_order();
        let totals = OrderTotals::from_subtotal(cart.total_price());

        assert_eq!(totals.subtotal_cents, 6197);
        assert_eq!(totals.tax_cents, 1301);
        assert_eq!(totals.shipping_cents, 0);
        assert_eq!(totals.total_cents, 7498); // ≈ $74.98
    }

    #[test]
    fn test_empty_cart_cannot_start_checkout() {
        let err = Checkout::for_cart(&Cart::new()).unwrap_err();
        assert_eq!(err, CoreError::EmptyCart);
    }

    #[test]
    fn test_happy_path_transitions() {
        let cart = cart_with_reference_order();
        let mut checkout = Checkout::for_cart(&cart).unwrap();

        assert_eq!(checkout.state(), CheckoutState::Reviewing);

        checkout.confirm(PaymentMethod::Card).unwrap();
        assert_eq!(checkout.state(), CheckoutState::Paying);
        assert_eq!(checkout.payment_method(), Some(PaymentMethod::Card));

        checkout.complete().unwrap();
        assert_eq!(checkout.state(), CheckoutState::Complete);
    }

    #[test]
    fn test_no_path_back_from_paying() {
        let cart = cart_with_reference_order();
        let mut checkout = Checkout::for_cart(&cart).unwrap();
        checkout.confirm(PaymentMethod::Paypal).unwrap();

        // Confirming again from Paying is rejected; there is no way back
        // to Reviewing either.
        let err = checkout.confirm(PaymentMethod::Card).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                state: "paying",
                action: "confirm",
            }
        );
        assert_eq!(checkout.payment_method(), Some(PaymentMethod::Paypal));
    }

    #[test]
    fn test_complete_requires_paying() {
        let cart = cart_with_reference_order();
        let mut checkout = Checkout::for_cart(&cart).unwrap();

        let err = checkout.complete().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                state: "reviewing",
                action: "complete",
            }
        );
    }
}
