//! HTTP route handlers for the SmartBuy API.
//!
//! # Route Structure
//!
//! ```text
//! # Auth (session-based)
//! POST /register                    - Create a customer account
//! POST /login                       - Log in, establishing a session
//! POST /logout                      - Log out
//!
//! # Products
//! GET    /api/products              - List products (?category= & ?search=)
//! GET    /api/products/{id}         - Product detail
//! POST   /api/products              - Create product
//! PUT    /api/products/{id}         - Update product
//! DELETE /api/products/{id}         - Delete product
//! GET    /api/products/{id}/reviews - Reviews for a product
//!
//! # Orders
//! GET    /api/orders                - Current customer's orders
//! GET    /api/orders/{id}           - Order detail with items
//! POST   /api/orders                - Create an empty pending order
//! PUT    /api/orders/{id}/status    - Set order status
//! DELETE /api/orders/{id}           - Delete an order
//!
//! # Cart (the customer's pending order)
//! GET    /api/cart                  - Cart with items and subtotal
//! POST   /api/cart/items            - Add an item {product_id, quantity}
//! PUT    /api/cart/items/{item_id}  - Change an item's quantity
//! DELETE /api/cart/items/{item_id}  - Remove an item
//! POST   /api/cart/checkout         - Place the pending order
//!
//! # Cards
//! GET    /api/cards                 - Saved cards
//! POST   /api/cards                 - Save a card
//! DELETE /api/cards/{id}            - Delete a card
//!
//! # Reviews
//! GET    /api/reviews/{id}          - Review detail
//! POST   /api/reviews               - Post a review {product_id, rating, comment}
//! PUT    /api/reviews/{id}          - Edit own review
//! DELETE /api/reviews/{id}          - Delete own review
//!
//! # Shipments
//! GET    /api/shipments/{order_id}  - Shipment for an order
//! POST   /api/shipments             - Create a shipment for an order
//! PUT    /api/shipments/{id}/status - Set shipment status
//!
//! # Wishlist
//! GET    /api/wishlist              - Current customer's wishlist
//! POST   /api/wishlist              - Add a product {product_id}
//! DELETE /api/wishlist/{product_id} - Remove a product
//!
//! # Payments
//! POST /api/payments/intent         - Create a Stripe PaymentIntent for an order
//! POST /api/payments/webhook        - Stripe webhook (signature-verified)
//!
//! # Chat
//! GET /ws/chat                      - WebSocket chat relay (auth required)
//! GET /api/chat/history             - Recent chat messages
//!
//! # Health
//! GET /health                       - Liveness
//! GET /health/ready                 - Readiness (checks Postgres)
//! ```

pub mod auth;
pub mod cards;
pub mod cart;
pub mod chat;
pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod shipments;
pub mod wishlist;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/{id}/reviews", get(products::reviews))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route("/{id}", get(orders::show).delete(orders::remove))
        .route("/{id}/status", put(orders::set_status))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add_item))
        .route(
            "/items/{item_id}",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/checkout", post(cart::checkout))
}

/// Create the card routes router.
pub fn card_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cards::list).post(cards::create))
        .route("/{id}", delete(cards::remove))
}

/// Create the review routes router.
pub fn review_routes() -> Router<AppState> {
    Router::new().route("/", post(reviews::create)).route(
        "/{id}",
        get(reviews::show)
            .put(reviews::update)
            .delete(reviews::remove),
    )
}

/// Create the shipment routes router.
pub fn shipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(shipments::create))
        .route("/{order_id}", get(shipments::show))
        .route("/{id}/status", put(shipments::set_status))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::list).post(wishlist::add))
        .route("/{product_id}", delete(wishlist::remove))
}

/// Create the payment routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/intent", post(payments::create_intent))
        .route("/webhook", post(payments::webhook))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Session auth
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        // Storefront resources
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/cards", card_routes())
        .nest("/api/reviews", review_routes())
        .nest("/api/shipments", shipment_routes())
        .nest("/api/wishlist", wishlist_routes())
        .nest("/api/payments", payment_routes())
        // Chat relay
        .route("/ws/chat", get(chat::ws))
        .route("/api/chat/history", get(chat::history))
        // Health
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
}
