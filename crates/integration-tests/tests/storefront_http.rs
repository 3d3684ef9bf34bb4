//! Cart and checkout against a running storefront.
//!
//! These tests require:
//! - A migrated and seeded database (`bq-cli migrate`, `bq-cli seed catalog ...`)
//! - The storefront running (cargo run -p boutique-storefront)
//!
//! Run with: cargo test -p boutique-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect::Policy};
use serde_json::Value;

/// Base URL for the storefront (configurable via environment).
fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Product to add to the cart; must be active and one-size.
fn product_id() -> String {
    std::env::var("TEST_PRODUCT_ID").unwrap_or_else(|_| "2".to_string())
}

/// A client that keeps the session cookie and does not follow redirects.
fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

async fn summary(client: &Client) -> Value {
    client
        .get(format!("{}/cart/summary", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get cart summary")
        .json()
        .await
        .expect("Cart summary is not JSON")
}

#[tokio::test]
#[ignore = "Requires running storefront and seeded database"]
async fn test_health() {
    let resp = session_client()
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront and seeded database"]
async fn test_add_to_cart_and_checkout() {
    let client = session_client();
    let base_url = storefront_base_url();

    let empty = summary(&client).await;
    assert!(empty["breakdown"].is_null());

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .form(&[("product_id", product_id().as_str()), ("quantity", "1")])
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["hx-trigger"], "cart-updated");

    let cart = summary(&client).await;
    assert_eq!(cart["item_count"], 1);
    assert_eq!(cart["items_until_free_shipping"], 2);
    assert_eq!(cart["breakdown"]["shipping_cost"], "300");

    let resp = client
        .post(format!("{base_url}/checkout"))
        .send()
        .await
        .expect("Failed to check out");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers()["location"]
        .to_str()
        .expect("Location is not ASCII")
        .to_string();
    assert!(location.starts_with("/orders/"));

    let resp = client
        .get(format!("{base_url}{location}"))
        .send()
        .await
        .expect("Failed to load order page");
    assert_eq!(resp.status(), StatusCode::OK);

    // The cart is cleared after checkout.
    assert!(summary(&client).await["breakdown"].is_null());

    // Another session cannot see the order.
    let resp = session_client()
        .get(format!("{base_url}{location}"))
        .send()
        .await
        .expect("Failed to request order page");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
