//! Integration tests for SmartBuy.
//!
//! # Running Tests
//!
//! ```bash
//! # With Postgres running, apply migrations
//! cargo run -p smartbuy-cli -- migrate
//!
//! # Start the API server
//! cargo run -p smartbuy-api
//!
//! # Run integration tests (ignored by default)
//! cargo test -p smartbuy-integration-tests -- --ignored
//! ```
//!
//! # Configuration
//!
//! - `SMARTBUY_TEST_BASE_URL` - API base URL (default `http://localhost:8080`)
//!
//! # Test Categories
//!
//! - `api_auth` - Registration, login, and session tests
//! - `api_catalog` - Product catalog and review tests
//! - `api_cart_checkout` - Cart, checkout, order, and shipment tests
//! - `api_account` - Saved card and wishlist tests
//! - `api_payments` - Payment intent and webhook tests
//!
//! Tests create their own customer accounts with unique emails, so they
//! can run repeatedly against the same database.
