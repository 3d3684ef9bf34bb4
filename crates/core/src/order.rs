//! Order snapshots taken at checkout.
//!
//! An [`OrderDraft`] freezes a cart: the pricing breakdown is copied
//! verbatim onto the order, and every line becomes an [`OrderItemDraft`]
//! carrying the marketplace commission owed by its seller.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::pricing::PricingBreakdown;
use crate::types::{Money, ProductId, SellerId};

/// Errors building an order from a cart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("cannot place an order for an empty cart")]
    EmptyCart,

    #[error("commission rate must be between 0 and 1 (got {0})")]
    InvalidCommissionRate(Decimal),
}

/// Validate a marketplace commission rate.
///
/// # Errors
///
/// Returns `OrderError::InvalidCommissionRate` unless `0 <= rate <= 1`.
pub fn validate_commission_rate(rate: Decimal) -> Result<Decimal, OrderError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(OrderError::InvalidCommissionRate(rate));
    }
    Ok(rate)
}

/// One line of an order, frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemDraft {
    pub product_id: ProductId,
    pub seller_id: SellerId,
    pub name: String,
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
    /// Marketplace fee on `line_total`.
    pub commission: Money,
}

/// An order ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub breakdown: PricingBreakdown,
    pub items: Vec<OrderItemDraft>,
}

/// What a single seller earns from an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerTotals {
    pub seller_id: SellerId,
    pub gross: Money,
    pub commission: Money,
}

impl SellerTotals {
    /// Gross sales minus commission.
    #[must_use]
    pub fn payout(&self) -> Money {
        Money::new(self.gross.amount() - self.commission.amount())
    }
}

impl OrderDraft {
    /// Snapshot a cart for checkout.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyCart` if the cart has no lines, or
    /// `OrderError::InvalidCommissionRate` if the rate is outside `[0, 1]`.
    pub fn from_cart(cart: &Cart, commission_rate: Decimal) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let rate = validate_commission_rate(commission_rate)?;

        let items = cart
            .lines()
            .iter()
            .map(|line| {
                let line_total = line.line_total();
                OrderItemDraft {
                    product_id: line.product_id,
                    seller_id: line.seller_id,
                    name: line.name.clone(),
                    size: line.size.clone(),
                    quantity: line.quantity.get(),
                    unit_price: line.unit_price(),
                    line_total,
                    commission: line_total * rate,
                }
            })
            .collect();

        Ok(Self {
            breakdown: PricingBreakdown::for_cart(cart),
            items,
        })
    }

    /// Per-seller gross and commission, ordered by seller ID.
    #[must_use]
    pub fn seller_totals(&self) -> Vec<SellerTotals> {
        seller_totals(&self.items)
    }
}

/// Group order items by seller.
#[must_use]
pub fn seller_totals(items: &[OrderItemDraft]) -> Vec<SellerTotals> {
    let mut by_seller: BTreeMap<i32, SellerTotals> = BTreeMap::new();
    for item in items {
        let entry = by_seller
            .entry(item.seller_id.as_i32())
            .or_insert(SellerTotals {
                seller_id: item.seller_id,
                gross: Money::ZERO,
                commission: Money::ZERO,
            });
        entry.gross = entry.gross + item.line_total;
        entry.commission = entry.commission + item.commission;
    }
    by_seller.into_values().collect()
}
