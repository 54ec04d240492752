//! Integration tests for payment intents and the Stripe webhook.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p smartbuy-api)
//! - A Stripe test-mode secret key in `SMARTBUY_STRIPE_SECRET_KEY`
//!
//! Run with: cargo test -p smartbuy-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

fn base_url() -> String {
    std::env::var("SMARTBUY_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a fresh customer, leaving the session cookie on the client.
async fn register(client: &Client) {
    let base_url = base_url();
    let email = format!("integration-test-{}@example.com", Uuid::new_v4());

    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({
            "email": email,
            "password": "correct horse battery",
            "full_name": "Integration Test"
        }))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), StatusCode::CREATED);
}

/// Build a cart with one product and check it out, returning the placed
/// order's ID.
async fn place_order(client: &Client) -> i64 {
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": format!("Payment Product {}", Uuid::new_v4()),
            "description": null,
            "price": "25.00",
            "currency": "usd",
            "stock": 10,
            "image_url": null,
            "category": "integration-tests"
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.expect("Failed to parse response");

    let resp = client
        .post(format!("{base_url}/api/cart/items"))
        .json(&json!({ "product_id": product["id"], "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base_url}/api/cart/checkout"))
        .send()
        .await
        .expect("Failed to check out");
    assert_eq!(resp.status(), StatusCode::OK);

    let order: Value = resp.json().await.expect("Failed to parse response");
    order["id"].as_i64().expect("missing order id")
}

// ============================================================================
// Payment Intent Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server, database, and Stripe test credentials"]
async fn test_create_payment_intent_for_order() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let order_id = place_order(&client).await;

    let resp = client
        .post(format!("{base_url}/api/payments/intent"))
        .json(&json!({ "order_id": order_id }))
        .send()
        .await
        .expect("Failed to create payment intent");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(
        body["payment_intent_id"]
            .as_str()
            .is_some_and(|id| id.starts_with("pi_"))
    );
    assert!(body["client_secret"].is_string());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_payment_intent_unknown_order_not_found() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let resp = client
        .post(format!("{base_url}/api/payments/intent"))
        .json(&json!({ "order_id": 999_999_999 }))
        .send()
        .await
        .expect("Failed to create payment intent");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_payment_intent_zero_total_rejected() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    // An empty pending order has a zero total
    let resp = client
        .post(format!("{base_url}/api/orders"))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = resp.json().await.expect("Failed to parse response");

    let resp = client
        .post(format!("{base_url}/api/payments/intent"))
        .json(&json!({ "order_id": order["id"] }))
        .send()
        .await
        .expect("Failed to create payment intent");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Webhook Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_webhook_missing_signature_rejected() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/payments/webhook"))
        .header("content-type", "application/json")
        .body(r#"{"type":"payment_intent.succeeded"}"#)
        .send()
        .await
        .expect("Failed to post webhook");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_webhook_bad_signature_rejected() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/payments/webhook"))
        .header("content-type", "application/json")
        .header("Stripe-Signature", "t=1700000000,v1=deadbeef")
        .body(r#"{"type":"payment_intent.succeeded"}"#)
        .send()
        .await
        .expect("Failed to post webhook");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
