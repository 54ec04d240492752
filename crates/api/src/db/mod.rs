//! Database operations for the SmartBuy `PostgreSQL` store.
//!
//! Postgres is the single source of truth; the MongoDB mirror is populated
//! from these tables by the background sync job.
//!
//! ## Tables
//!
//! - `customer` - Registered shoppers (argon2 password hashes)
//! - `sessions` - Tower-sessions storage
//! - `product` - Catalog
//! - `store_order` / `order_item` - Orders; a `pending` order is the cart
//! - `card` - Saved payment cards (brand/last4 only, never full numbers)
//! - `review` - Product reviews
//! - `shipment` - One per order
//! - `payment` - Stripe `PaymentIntent` tracking
//! - `wishlist_item` - Customer wishlists
//! - `chat_message` - Chat relay history
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p smartbuy-cli -- migrate
//! ```

pub mod cards;
pub mod chat;
pub mod customers;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod shipments;
pub mod wishlist;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The targeted row does not exist.
    #[error("not found")]
    NotFound,

    /// A stored value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
pub(crate) fn map_unique_violation(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
