//! Integration tests for the product catalog and reviews.
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
async fn register(client: &Client) -> Value {
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
    resp.json().await.expect("Failed to parse response")
}

/// Create a test product, returning its JSON representation.
async fn create_product(client: &Client, name: &str, price: &str, stock: i32) -> Value {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": name,
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
    resp.json().await.expect("Failed to parse response")
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_list_is_public() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to list products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_crud_cycle() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let name = format!("Test Product {}", Uuid::new_v4());
    let product = create_product(&client, &name, "19.99", 5).await;
    let id = product["id"].as_i64().expect("missing product id");
    assert_eq!(product["name"], name.as_str());
    assert_eq!(product["price"], "19.99");
    assert_eq!(product["stock"], 5);

    // Detail is public
    let resp = reqwest::get(format!("{base_url}/api/products/{id}"))
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::OK);

    // Update all fields
    let resp = client
        .put(format!("{base_url}/api/products/{id}"))
        .json(&json!({
            "name": name,
            "description": "Updated by an integration test",
            "price": "24.99",
            "currency": "usd",
            "stock": 3,
            "image_url": null,
            "category": "integration-tests"
        }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["price"], "24.99");
    assert_eq!(body["stock"], 3);

    // Delete
    let resp = client
        .delete(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Gone
    let resp = reqwest::get(format!("{base_url}/api/products/{id}"))
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_list_filters() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let marker = Uuid::new_v4().simple().to_string();
    let name = format!("Filterable Widget {marker}");
    create_product(&client, &name, "9.99", 10).await;

    // Search filter matches case-insensitively
    let resp = client
        .get(format!("{base_url}/api/products?search=filterable widget"))
        .send()
        .await
        .expect("Failed to search products");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let names: Vec<&str> = body
        .as_array()
        .expect("expected array")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert!(names.iter().any(|n| n.contains(&marker)));

    // Category filter
    let resp = client
        .get(format!("{base_url}/api/products?category=integration-tests"))
        .send()
        .await
        .expect("Failed to filter products");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    for product in body.as_array().expect("expected array") {
        assert_eq!(product["category"], "integration-tests");
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_create_requires_auth() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": "Unauthorized Product",
            "description": null,
            "price": "1.00",
            "stock": 1,
            "image_url": null,
            "category": null
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_create_validates_fields() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    // Empty name
    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": "",
            "description": null,
            "price": "1.00",
            "stock": 1,
            "image_url": null,
            "category": null
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Negative price
    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "name": "Bad Price",
            "description": null,
            "price": "-1.00",
            "stock": 1,
            "image_url": null,
            "category": null
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_review_lifecycle() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let name = format!("Reviewed Product {}", Uuid::new_v4());
    let product = create_product(&client, &name, "14.50", 10).await;
    let product_id = product["id"].as_i64().expect("missing product id");

    // Post a review
    let resp = client
        .post(format!("{base_url}/api/reviews"))
        .json(&json!({
            "product_id": product_id,
            "rating": 4,
            "comment": "Solid product"
        }))
        .send()
        .await
        .expect("Failed to post review");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let review: Value = resp.json().await.expect("Failed to parse response");
    let review_id = review["id"].as_i64().expect("missing review id");
    assert_eq!(review["rating"], 4);

    // Review shows up on the product
    let resp = reqwest::get(format!("{base_url}/api/products/{product_id}/reviews"))
        .await
        .expect("Failed to list reviews");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = body
        .as_array()
        .expect("expected array")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert!(ids.contains(&review_id));

    // Edit own review
    let resp = client
        .put(format!("{base_url}/api/reviews/{review_id}"))
        .json(&json!({ "rating": 5, "comment": "Even better after a week" }))
        .send()
        .await
        .expect("Failed to update review");
    assert_eq!(resp.status(), StatusCode::OK);

    // Another customer cannot edit it
    let other = client_with_session().await;
    let resp = other
        .put(format!("{base_url}/api/reviews/{review_id}"))
        .json(&json!({ "rating": 1, "comment": "hijacked" }))
        .send()
        .await
        .expect("Failed to update review");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Delete own review
    let resp = client
        .delete(format!("{base_url}/api/reviews/{review_id}"))
        .send()
        .await
        .expect("Failed to delete review");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_review_rejects_out_of_range_rating() {
    let client = client();
    let base_url = base_url();
    register(&client).await;

    let product = create_product(&client, "Rating Bounds", "5.00", 1).await;
    let product_id = product["id"].as_i64().expect("missing product id");

    for rating in [0, 6] {
        let resp = client
            .post(format!("{base_url}/api/reviews"))
            .json(&json!({
                "product_id": product_id,
                "rating": rating,
                "comment": null
            }))
            .send()
            .await
            .expect("Failed to post review");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "rating: {rating}");
    }
}

/// Register a second customer on a fresh client.
async fn client_with_session() -> Client {
    let client = client();
    register(&client).await;
    client
}
