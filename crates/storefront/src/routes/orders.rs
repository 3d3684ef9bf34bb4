//! Order confirmation pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;

use boutique_core::OrderId;
use boutique_core::order::SellerTotals;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::cart::order_history;
use crate::models::Order;
use crate::state::AppState;

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: Order,
    pub sellers: Vec<SellerTotals>,
}

/// Show an order placed from this session.
///
/// Orders from other sessions are reported as not found.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<OrderShowTemplate> {
    let order_id = OrderId::new(id);
    if !order_history(&session).await?.contains(&order_id) {
        return Err(AppError::NotFound(format!("order {id}")));
    }

    let order = OrderRepository::new(state.pool())
        .get_by_id(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    let sellers = order.seller_totals();
    Ok(OrderShowTemplate { order, sellers })
}
