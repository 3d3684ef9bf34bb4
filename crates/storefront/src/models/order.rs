//! Persisted order model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use boutique_core::order::{SellerTotals, seller_totals};
use boutique_core::{OrderId, OrderItemDraft, OrderStatus, PricingBreakdown};

/// A placed order as stored in the database.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    /// Snapshot of the cart's pricing at checkout.
    pub breakdown: PricingBreakdown,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

/// A line of a placed order.
pub type OrderItem = OrderItemDraft;

impl Order {
    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Per-seller gross and commission.
    #[must_use]
    pub fn seller_totals(&self) -> Vec<SellerTotals> {
        seller_totals(&self.items)
    }
}
