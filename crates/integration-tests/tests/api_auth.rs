//! Integration tests for customer authentication.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p smartbuy-api)
//!
//! Run with: cargo test -p smartbuy-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("SMARTBUY_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Create a client with a cookie store so the session cookie survives
/// across requests.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique test email so tests can run repeatedly.
fn unique_email() -> String {
    format!("integration-test-{}@example.com", Uuid::new_v4())
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_creates_account_and_session() {
    let client = client();
    let base_url = base_url();
    let email = unique_email();

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

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], email);
    assert_eq!(body["full_name"], "Integration Test");
    assert!(body["id"].is_number());

    // Registration establishes a session; a protected route should work
    let resp = client
        .get(format!("{base_url}/api/orders"))
        .send()
        .await
        .expect("Failed to list orders");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_duplicate_email_conflicts() {
    let client = client();
    let base_url = base_url();
    let email = unique_email();

    let payload = json!({
        "email": email,
        "password": "correct horse battery",
        "full_name": "Integration Test"
    });

    let resp = client
        .post(format!("{base_url}/register"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base_url}/register"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to register again");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_rejects_weak_password() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({
            "email": unique_email(),
            "password": "short",
            "full_name": "Integration Test"
        }))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_register_rejects_invalid_email() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({
            "email": "not-an-email",
            "password": "correct horse battery",
            "full_name": "Integration Test"
        }))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Login & Logout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_login_logout_cycle() {
    let base_url = base_url();
    let email = unique_email();
    let password = "correct horse battery";

    // Register with one client
    let register_client = client();
    let resp = register_client
        .post(format!("{base_url}/register"))
        .json(&json!({
            "email": email,
            "password": password,
            "full_name": "Integration Test"
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Log in with a fresh client
    let client = client();
    let resp = client
        .post(format!("{base_url}/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], email);

    // Session works
    let resp = client
        .get(format!("{base_url}/api/wishlist"))
        .send()
        .await
        .expect("Failed to list wishlist");
    assert_eq!(resp.status(), StatusCode::OK);

    // Log out
    let resp = client
        .post(format!("{base_url}/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Session is gone
    let resp = client
        .get(format!("{base_url}/api/wishlist"))
        .send()
        .await
        .expect("Failed to list wishlist");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_login_wrong_password_unauthorized() {
    let base_url = base_url();
    let email = unique_email();

    let client = client();
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

    let resp = client
        .post(format!("{base_url}/login"))
        .json(&json!({ "email": email, "password": "wrong password" }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_protected_routes_require_session() {
    let client = client();
    let base_url = base_url();

    for path in ["/api/cart", "/api/orders", "/api/cards", "/api/wishlist"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to request protected route");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "path: {path}");
    }
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_health_endpoints() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to check health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to check readiness");
    assert_eq!(resp.status(), StatusCode::OK);
}
