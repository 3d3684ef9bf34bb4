//! Checkout: turn the session cart into a persisted order.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use boutique_core::OrderDraft;

use crate::db::OrderRepository;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::CurrentCart;
use crate::middleware::cart::record_order;
use crate::state::AppState;

/// Place an order for the current cart.
///
/// The pricing breakdown is computed from the same cart lines the shopper
/// saw and copied verbatim onto the order. On success the cart is cleared
/// and the shopper is redirected to the order page; an empty cart
/// redirects back to the cart.
#[instrument(skip(state, current))]
pub async fn checkout(State(state): State<AppState>, mut current: CurrentCart) -> Result<Response> {
    if current.cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let draft = OrderDraft::from_cart(&current.cart, state.config().commission_rate)?;
    let order_id = OrderRepository::new(state.pool()).create(&draft).await?;

    record_order(&current.session, order_id).await?;
    current.cart.clear();
    current.save().await?;

    let order_ref = order_id.to_string();
    add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order_ref.as_str())]));
    tracing::info!(
        %order_id,
        items = draft.items.len(),
        total = %draft.breakdown.total,
        "Checkout complete"
    );

    Ok(Redirect::to(&format!("/orders/{order_id}")).into_response())
}
