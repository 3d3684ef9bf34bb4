//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Products
//! GET  /products               - Product listing
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page with pricing breakdown
//! GET  /cart/summary           - Cart lines and breakdown (JSON)
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! POST /checkout               - Place order, redirect to confirmation
//! GET  /orders/{id}            - Order confirmation (placing session only)
//! ```

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/summary", get(cart::summary))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/products", get(products::index))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        .route("/orders/{id}", get(orders::show))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use rust_decimal::Decimal;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;
    use tower_sessions::cookie::Key;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::middleware::session_layer_with_store;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/boutique_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(64)),
            commission_rate: Decimal::new(10, 2),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Router backed by an in-memory session store and a pool that never
    /// connects; only handlers that stay off the database can be exercised.
    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/boutique_test")
            .unwrap();
        let state = AppState::new(test_config(), pool);
        routes()
            .layer(session_layer_with_store(
                MemoryStore::default(),
                Key::from(&[9_u8; 64][..]),
                false,
            ))
            .with_state(state)
    }

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_products() {
        let response = app().oneshot(get("/")).await.unwrap();
        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/products");
    }

    #[tokio::test]
    async fn test_empty_cart_page() {
        let response = app().oneshot(get("/cart")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Your cart is empty"));
    }

    #[tokio::test]
    async fn test_empty_cart_count() {
        let response = app().oneshot(get("/cart/count")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains('0'));
    }

    #[tokio::test]
    async fn test_empty_cart_summary_has_no_breakdown() {
        let response = app().oneshot(get("/cart/summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["breakdown"].is_null());
        assert_eq!(json["item_count"], 0);
        assert_eq!(json["items_until_free_shipping"], 3);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_redirects_to_cart() {
        let response = app().oneshot(form("/checkout", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cart");
    }

    #[tokio::test]
    async fn test_update_with_malformed_line_id() {
        let response = app()
            .oneshot(form("/cart/update", "line_id=nope&quantity=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_unknown_line_is_not_found() {
        let body = format!("line_id={}&quantity=2", boutique_core::CartLineId::generate());
        let response = app().oneshot(form("/cart/update", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_remove_unknown_line_is_not_found() {
        let body = format!("line_id={}", boutique_core::CartLineId::generate());
        let response = app().oneshot(form("/cart/remove", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_rejects_zero_quantity() {
        let response = app()
            .oneshot(form("/cart/add", "product_id=1&quantity=0"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_rejects_quantity_above_line_limit() {
        let response = app()
            .oneshot(form("/cart/add", "product_id=1&quantity=3000000000"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_rejects_quantity_above_line_limit() {
        let body = format!(
            "line_id={}&quantity=2147483647",
            boutique_core::CartLineId::generate()
        );
        let response = app().oneshot(form("/cart/update", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_order_from_another_session_is_not_found() {
        let response = app().oneshot(get("/orders/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
