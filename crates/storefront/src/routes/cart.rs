//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The typed cart lives in the session; every view recomputes its pricing
//! breakdown from the stored lines.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boutique_core::pricing::items_until_free_shipping;
use boutique_core::{Cart, CartLine, CartLineId, PricingBreakdown, ProductId, Quantity};

use crate::db::ProductRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CurrentCart;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Cart display data for templates and the JSON summary.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// `None` for an empty cart; pricing is never computed for nothing.
    pub breakdown: Option<PricingBreakdown>,
    pub item_count: u32,
    /// "N more items for free shipping" hint.
    pub items_until_free_shipping: u32,
}

impl CartView {
    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            size: line.size.clone(),
            quantity: line.quantity.get(),
            unit_price: line.unit_price().amount(),
            line_total: line.line_total().amount(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let item_count = cart.item_count();
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            breakdown: (!cart.is_empty()).then(|| PricingBreakdown::for_cart(cart)),
            item_count,
            items_until_free_shipping: items_until_free_shipping(item_count),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub size: Option<String>,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

fn parse_line_id(raw: &str) -> Result<CartLineId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("invalid cart line id: {raw}")))
}

fn cart_updated(cart: &Cart) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(cart),
        },
    )
        .into_response()
}

/// Display cart page.
#[instrument(skip(current))]
pub async fn show(current: CurrentCart) -> impl IntoResponse {
    CartShowTemplate {
        cart: CartView::from(&current.cart),
    }
}

/// Cart contents and pricing as JSON.
#[instrument(skip(current))]
pub async fn summary(current: CurrentCart) -> Json<CartView> {
    Json(CartView::from(&current.cart))
}

/// Add item to cart (HTMX).
///
/// The unit price is read from the catalog, never from the form. Returns
/// the cart count badge and an HTMX trigger for other cart widgets.
#[instrument(skip(state, current))]
pub async fn add(
    State(state): State<AppState>,
    mut current: CurrentCart,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let quantity = Quantity::new(form.quantity.unwrap_or(1))?;

    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(form.product_id))
        .await?
        .filter(|p| p.active)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let size = product
        .resolve_size(form.size.as_deref())
        .ok_or_else(|| AppError::BadRequest(format!("size not available for {}", product.name)))?;

    let line = CartLine::new(
        product.id,
        product.seller_id,
        product.name.clone(),
        size,
        product.price,
        quantity,
    )?;
    let line_id = current.cart.add(line)?;
    current.save().await?;

    let product_id = product.id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    tracing::info!(%line_id, product_id = %product.id, quantity = quantity.get(), "Added to cart");

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: current.cart.item_count(),
        },
    )
        .into_response())
}

/// Update cart item quantity (HTMX). A quantity of zero removes the line.
#[instrument(skip(current))]
pub async fn update(mut current: CurrentCart, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let line_id = parse_line_id(&form.line_id)?;
    current.cart.set_quantity(line_id, form.quantity)?;
    current.save().await?;
    Ok(cart_updated(&current.cart))
}

/// Remove item from cart (HTMX).
#[instrument(skip(current))]
pub async fn remove(
    mut current: CurrentCart,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let line_id = parse_line_id(&form.line_id)?;
    current.cart.remove(line_id)?;
    current.save().await?;
    Ok(cart_updated(&current.cart))
}

/// Get cart count badge (HTMX).
#[instrument(skip(current))]
pub async fn count(current: CurrentCart) -> impl IntoResponse {
    CartCountTemplate {
        count: current.cart.item_count(),
    }
}
