//! Shipping, tax and total computation for carts and orders.
//!
//! The business rules are fixed:
//!
//! - shipping is free from [`FREE_SHIPPING_THRESHOLD`] items upward and a flat
//!   [`FLAT_SHIPPING_FEE`] below it (an empty cart counts as below it);
//! - VAT at [`TAX_RATE`] is charged on `subtotal + shipping`, not on the
//!   subtotal alone;
//! - `total = subtotal + shipping + tax`.
//!
//! Everything here is pure and keeps full decimal precision. Amounts are
//! rounded only for display, see [`crate::types::Money::display_rounded`].
//!
//! ```
//! use boutique_core::pricing::compute_breakdown;
//! use rust_decimal::Decimal;
//!
//! let breakdown = compute_breakdown(Decimal::from(100), 1);
//! assert_eq!(breakdown.shipping_cost, Decimal::from(300));
//! assert_eq!(breakdown.tax, Decimal::from(72));
//! assert_eq!(breakdown.total, Decimal::from(472));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;

/// Item count at which shipping becomes free.
pub const FREE_SHIPPING_THRESHOLD: u32 = 3;

/// Flat shipping fee charged below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(300, 0, 0, false, 0);

/// VAT rate (18%).
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Errors from the validating entry point [`try_compute_breakdown`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("subtotal cannot be negative (got {0})")]
    NegativeSubtotal(Decimal),
}

/// Subtotal, shipping, tax and total for a cart snapshot.
///
/// Recomputed on every cart view and at checkout; only the checkout
/// snapshot is ever persisted (on the order row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl PricingBreakdown {
    /// Price a typed cart.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        compute_breakdown(cart.subtotal().amount(), cart.item_count())
    }

    /// The amount VAT was charged on.
    #[must_use]
    pub fn tax_base(&self) -> Decimal {
        self.subtotal + self.shipping_cost
    }
}

/// Shipping cost for a cart holding `item_count` units in total.
#[must_use]
pub const fn compute_shipping(item_count: u32) -> Decimal {
    if item_count >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING_FEE
    }
}

/// VAT owed on `taxable_amount`.
#[must_use]
pub fn compute_tax(taxable_amount: Decimal) -> Decimal {
    taxable_amount * TAX_RATE
}

/// Full breakdown for a subtotal and total item count.
///
/// Inputs are assumed validated by the caller; see
/// [`try_compute_breakdown`] for the checked variant.
#[must_use]
pub fn compute_breakdown(subtotal: Decimal, item_count: u32) -> PricingBreakdown {
    let shipping_cost = compute_shipping(item_count);
    let tax = compute_tax(subtotal + shipping_cost);
    PricingBreakdown {
        subtotal,
        shipping_cost,
        tax,
        total: subtotal + shipping_cost + tax,
    }
}

/// Like [`compute_breakdown`], but rejects a negative subtotal.
///
/// # Errors
///
/// Returns `PricingError::NegativeSubtotal` if `subtotal < 0`.
pub fn try_compute_breakdown(
    subtotal: Decimal,
    item_count: u32,
) -> Result<PricingBreakdown, PricingError> {
    if subtotal.is_sign_negative() && !subtotal.is_zero() {
        return Err(PricingError::NegativeSubtotal(subtotal));
    }
    Ok(compute_breakdown(subtotal, item_count))
}

/// How many more items the shopper needs for free shipping.
#[must_use]
pub const fn items_until_free_shipping(item_count: u32) -> u32 {
    FREE_SHIPPING_THRESHOLD.saturating_sub(item_count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::{CartLine, Quantity};
    use crate::types::{Money, ProductId, SellerId};

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_shipping_free_from_three_items() {
        for count in [3, 4, 10, 1_000, u32::MAX] {
            assert_eq!(compute_shipping(count), Decimal::ZERO, "count {count}");
        }
    }

    #[test]
    fn test_shipping_flat_below_threshold() {
        assert_eq!(compute_shipping(1), d(300));
        assert_eq!(compute_shipping(2), d(300));
        // Empty carts fall under "fewer than three".
        assert_eq!(compute_shipping(0), d(300));
    }

    #[test]
    fn test_tax_is_eighteen_percent() {
        assert_eq!(compute_tax(d(400)), d(72));
        assert_eq!(compute_tax(d(3000)), d(540));
        assert_eq!(compute_tax(Decimal::new(1999, 2)), Decimal::new(35982, 4));
        assert_eq!(compute_tax(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_tax_charged_on_subtotal_plus_shipping() {
        let breakdown = compute_breakdown(d(100), 2);
        assert_eq!(breakdown.tax_base(), d(400));
        assert_eq!(breakdown.tax, compute_tax(d(400)));
        assert_ne!(breakdown.tax, compute_tax(d(100)));
    }

    #[test]
    fn test_single_item_under_threshold() {
        assert_eq!(
            compute_breakdown(d(100), 1),
            PricingBreakdown {
                subtotal: d(100),
                shipping_cost: d(300),
                tax: d(72),
                total: d(472),
            }
        );
    }

    #[test]
    fn test_three_items_ship_free() {
        assert_eq!(
            compute_breakdown(d(3000), 3),
            PricingBreakdown {
                subtotal: d(3000),
                shipping_cost: Decimal::ZERO,
                tax: d(540),
                total: d(3540),
            }
        );
    }

    #[test]
    fn test_empty_cart_pays_flat_shipping() {
        assert_eq!(
            compute_breakdown(Decimal::ZERO, 0),
            PricingBreakdown {
                subtotal: Decimal::ZERO,
                shipping_cost: d(300),
                tax: d(54),
                total: d(354),
            }
        );
    }

    #[test]
    fn test_total_invariant_holds() {
        let subtotals = [
            Decimal::ZERO,
            Decimal::new(1, 2),
            Decimal::new(4999, 2),
            d(299),
            Decimal::new(123_456_789, 3),
        ];
        for subtotal in subtotals {
            for count in 0..6 {
                let b = compute_breakdown(subtotal, count);
                assert_eq!(b.total, b.subtotal + b.shipping_cost + b.tax);
                assert_eq!(b.tax, (b.subtotal + b.shipping_cost) * TAX_RATE);
                assert_eq!(b.subtotal, subtotal);
            }
        }
    }

    #[test]
    fn test_crossing_threshold_drops_total_by_354() {
        for subtotal in [Decimal::ZERO, d(100), Decimal::new(8750, 2)] {
            let two = compute_breakdown(subtotal, 2);
            let three = compute_breakdown(subtotal, 3);
            assert_eq!(two.total - three.total, d(354));
        }
    }

    #[test]
    fn test_full_precision_kept() {
        let b = compute_breakdown(Decimal::new(3333, 2), 1);
        assert_eq!(b.tax, Decimal::new(599_994, 4));
        assert_eq!(b.total, Decimal::new(3_933_294, 4));
        assert_eq!(Money::new(b.total).display_rounded(), d(393));
    }

    #[test]
    fn test_try_compute_rejects_negative_subtotal() {
        assert_eq!(
            try_compute_breakdown(d(-1), 1),
            Err(PricingError::NegativeSubtotal(d(-1)))
        );
        assert_eq!(
            try_compute_breakdown(d(100), 1).unwrap(),
            compute_breakdown(d(100), 1)
        );
    }

    #[test]
    fn test_items_until_free_shipping() {
        assert_eq!(items_until_free_shipping(0), 3);
        assert_eq!(items_until_free_shipping(1), 2);
        assert_eq!(items_until_free_shipping(2), 1);
        assert_eq!(items_until_free_shipping(3), 0);
        assert_eq!(items_until_free_shipping(7), 0);
    }

    #[test]
    fn test_breakdown_for_cart() {
        let mut cart = Cart::new();
        for (product, price, qty) in [(1, 1200, 2), (2, 600, 1)] {
            let line = CartLine::new(
                ProductId::new(product),
                SellerId::new(9),
                "Item",
                None,
                Money::new(d(price)),
                Quantity::new(qty).unwrap(),
            )
            .unwrap();
            cart.add(line).unwrap();
        }
        let b = PricingBreakdown::for_cart(&cart);
        assert_eq!(b, compute_breakdown(d(3000), 3));
        assert_eq!(b.total, d(3540));
    }
}
