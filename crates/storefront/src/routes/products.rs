//! Product listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::models::Product;
use crate::state::AppState;

const LISTING_LIMIT: i64 = 60;

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
}

/// List active products with add-to-cart forms.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<ProductsIndexTemplate> {
    let products = ProductRepository::new(state.pool())
        .list_active(LISTING_LIMIT)
        .await?;
    Ok(ProductsIndexTemplate { products })
}
