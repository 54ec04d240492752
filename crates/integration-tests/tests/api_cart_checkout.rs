//! Integration tests for the cart, checkout, orders, and shipments.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p smartbuy-api)
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

/// Create a test product, returning its ID.
async fn create_product(client: &Client, price: &str, stock: i32) -> i64 {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": format!("Checkout Product {}", Uuid::new_v4()),
            "description": "Created by an integration test",
            "price": price,
            "currency": "usd",
            "stock": stock,
            "image_url": null,
            "category": "integration-tests"
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("missing product id")
}

// ============================================================================
// Cart Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_cart_starts_empty() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let resp = client
        .get(format!("{base_url}/api/cart"))
        .send()
        .await
        .expect("Failed to get cart");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["order_id"].is_number());
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["subtotal"], "0");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_cart_add_update_remove_item() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let product_id = create_product(&client, "10.00", 20).await;

    // Add two units
    let resp = client
        .post(format!("{base_url}/api/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": 2 }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cart: Value = resp.json().await.expect("Failed to parse response");
    let items = cart["items"].as_array().expect("expected items array");
    assert_eq!(items.len(), 1);
    let item_id = items[0]["id"].as_i64().expect("missing item id");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(cart["subtotal"], "20.00");

    // Adding the same product again sums quantities
    let resp = client
        .post(format!("{base_url}/api/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cart: Value = resp.json().await.expect("Failed to parse response");
    let items = cart["items"].as_array().expect("expected items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);

    // Set the quantity directly
    let resp = client
        .put(format!("{base_url}/api/cart/items/{item_id}"))
        .json(&json!({ "quantity": 5 }))
        .send()
        .await
        .expect("Failed to update item");
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(cart["items"][0]["quantity"], 5);
    assert_eq!(cart["subtotal"], "50.00");

    // Remove the item
    let resp = client
        .delete(format!("{base_url}/api/cart/items/{item_id}"))
        .send()
        .await
        .expect("Failed to remove item");
    assert_eq!(resp.status(), StatusCode::OK);

    let cart: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_cart_rejects_non_positive_quantity() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let product_id = create_product(&client, "10.00", 20).await;

    let resp = client
        .post(format!("{base_url}/api/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to add item");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Checkout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_checkout_places_order_and_decrements_stock() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let product_id = create_product(&client, "12.50", 10).await;

    let resp = client
        .post(format!("{base_url}/api/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": 3 }))
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
    assert_eq!(order["status"], "placed");
    assert_eq!(order["total"], "37.50");
    assert_eq!(order["items"].as_array().map(Vec::len), Some(1));

    // Stock decremented
    let resp = reqwest::get(format!("{base_url}/api/products/{product_id}"))
        .await
        .expect("Failed to get product");
    let product: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(product["stock"], 7);

    // A new cart is a fresh pending order
    let resp = client
        .get(format!("{base_url}/api/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let cart: Value = resp.json().await.expect("Failed to parse response");
    assert_ne!(cart["order_id"], order["id"]);
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_checkout_empty_cart_fails() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    // Materialize an empty pending order
    let resp = client
        .get(format!("{base_url}/api/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base_url}/api/cart/checkout"))
        .send()
        .await
        .expect("Failed to check out");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_checkout_insufficient_stock_fails() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let product_id = create_product(&client, "5.00", 2).await;

    let resp = client
        .post(format!("{base_url}/api/cart/items"))
        .json(&json!({ "product_id": product_id, "quantity": 3 }))
        .send()
        .await
        .expect("Failed to add item");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base_url}/api/cart/checkout"))
        .send()
        .await
        .expect("Failed to check out");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Stock untouched
    let resp = reqwest::get(format!("{base_url}/api/products/{product_id}"))
        .await
        .expect("Failed to get product");
    let product: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(product["stock"], 2);
}

// ============================================================================
// Order Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_orders_are_scoped_to_customer() {
    let base_url = base_url();

    let owner = client();
    register(&owner).await;

    let resp = owner
        .post(format!("{base_url}/api/orders"))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = resp.json().await.expect("Failed to parse response");
    let order_id = order["id"].as_i64().expect("missing order id");
    assert_eq!(order["status"], "pending");

    // The owner sees it
    let resp = owner
        .get(format!("{base_url}/api/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to get order");
    assert_eq!(resp.status(), StatusCode::OK);

    // Another customer gets a 404, not a 403
    let stranger = client();
    register(&stranger).await;

    let resp = stranger
        .get(format!("{base_url}/api/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to get order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = stranger
        .delete(format!("{base_url}/api/orders/{order_id}"))
        .send()
        .await
        .expect("Failed to delete order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_status_update() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let resp = client
        .post(format!("{base_url}/api/orders"))
        .send()
        .await
        .expect("Failed to create order");
    let order: Value = resp.json().await.expect("Failed to parse response");
    let order_id = order["id"].as_i64().expect("missing order id");

    let resp = client
        .put(format!("{base_url}/api/orders/{order_id}/status"))
        .json(&json!({ "status": "cancelled" }))
        .send()
        .await
        .expect("Failed to set status");
    assert_eq!(resp.status(), StatusCode::OK);

    let order: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(order["status"], "cancelled");
}

// ============================================================================
// Shipment Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_shipment_lifecycle() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let resp = client
        .post(format!("{base_url}/api/orders"))
        .send()
        .await
        .expect("Failed to create order");
    let order: Value = resp.json().await.expect("Failed to parse response");
    let order_id = order["id"].as_i64().expect("missing order id");

    // Create a shipment for the order
    let resp = client
        .post(format!("{base_url}/api/shipments"))
        .json(&json!({
            "order_id": order_id,
            "address": "123 Test Street",
            "city": "Test City",
            "country": "US",
            "postal_code": "90210"
        }))
        .send()
        .await
        .expect("Failed to create shipment");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let shipment: Value = resp.json().await.expect("Failed to parse response");
    let shipment_id = shipment["id"].as_i64().expect("missing shipment id");
    assert_eq!(shipment["status"], "preparing");
    assert!(shipment["shipped_at"].is_null());

    // A second shipment for the same order conflicts
    let resp = client
        .post(format!("{base_url}/api/shipments"))
        .json(&json!({
            "order_id": order_id,
            "address": "123 Test Street",
            "city": "Test City",
            "country": "US",
            "postal_code": "90210"
        }))
        .send()
        .await
        .expect("Failed to create shipment");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Look it up by order
    let resp = client
        .get(format!("{base_url}/api/shipments/{order_id}"))
        .send()
        .await
        .expect("Failed to get shipment");
    assert_eq!(resp.status(), StatusCode::OK);

    // Mark shipped; shipped_at gets stamped
    let resp = client
        .put(format!("{base_url}/api/shipments/{shipment_id}/status"))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Failed to set status");
    assert_eq!(resp.status(), StatusCode::OK);

    let shipment: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(shipment["status"], "shipped");
    assert!(shipment["shipped_at"].is_string());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_shipment_validates_address_fields() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let resp = client
        .post(format!("{base_url}/api/orders"))
        .send()
        .await
        .expect("Failed to create order");
    let order: Value = resp.json().await.expect("Failed to parse response");
    let order_id = order["id"].as_i64().expect("missing order id");

    let resp = client
        .post(format!("{base_url}/api/shipments"))
        .json(&json!({
            "order_id": order_id,
            "address": "  ",
            "city": "Test City",
            "country": "US",
            "postal_code": "90210"
        }))
        .send()
        .await
        .expect("Failed to create shipment");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
