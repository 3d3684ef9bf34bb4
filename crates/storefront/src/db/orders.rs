//! Order repository.
//!
//! Orders are written once at checkout from an [`OrderDraft`]; the pricing
//! breakdown is copied verbatim onto the order row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use boutique_core::{
    Money, OrderDraft, OrderId, OrderItemDraft, OrderStatus, PricingBreakdown, ProductId,
    SellerId,
};

use super::RepositoryError;
use crate::models::Order;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    status: OrderStatus,
    subtotal: Decimal,
    shipping_cost: Decimal,
    tax: Decimal,
    total: Decimal,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    product_id: i32,
    seller_id: i32,
    name: String,
    size: Option<String>,
    quantity: i32,
    unit_price: Decimal,
    line_total: Decimal,
    commission: Decimal,
}

impl TryFrom<OrderItemRow> for OrderItemDraft {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!("negative quantity {}", row.quantity))
        })?;
        Ok(Self {
            product_id: ProductId::new(row.product_id),
            seller_id: SellerId::new(row.seller_id),
            name: row.name,
            size: row.size,
            quantity,
            unit_price: Money::new(row.unit_price),
            line_total: Money::new(row.line_total),
            commission: Money::new(row.commission),
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order and its items in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails (nothing is
    /// written in that case).
    #[instrument(skip(self, draft), fields(items = draft.items.len()))]
    pub async fn create(&self, draft: &OrderDraft) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let b = &draft.breakdown;

        let (order_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO storefront."order" (status, subtotal, shipping_cost, tax, total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(OrderStatus::Pending)
        .bind(b.subtotal)
        .bind(b.shipping_cost)
        .bind(b.tax)
        .bind(b.total)
        .fetch_one(&mut *tx)
        .await?;

        for item in &draft.items {
            let quantity = i32::try_from(item.quantity).map_err(|_| {
                RepositoryError::DataCorruption(format!("quantity {} too large", item.quantity))
            })?;

            sqlx::query(
                r"
                INSERT INTO storefront.order_item (
                    order_id, product_id, seller_id, name, size,
                    quantity, unit_price, line_total, commission
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ",
            )
            .bind(order_id)
            .bind(item.product_id.as_i32())
            .bind(item.seller_id.as_i32())
            .bind(&item.name)
            .bind(item.size.as_deref())
            .bind(quantity)
            .bind(item.unit_price.amount())
            .bind(item.line_total.amount())
            .bind(item.commission.amount())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(order_id, total = %b.total, "Order created");
        Ok(OrderId::new(order_id))
    }

    /// Get an order with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored item is invalid.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let Some(row) = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, status, subtotal, shipping_cost, tax, total, created_at
            FROM storefront."order"
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT product_id, seller_id, name, size, quantity,
                   unit_price, line_total, commission
            FROM storefront.order_item
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(OrderItemDraft::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Order {
            id: OrderId::new(row.id),
            status: row.status,
            breakdown: PricingBreakdown {
                subtotal: row.subtotal,
                shipping_cost: row.shipping_cost,
                tax: row.tax,
                total: row.total,
            },
            items,
            created_at: row.created_at,
        }))
    }
}
