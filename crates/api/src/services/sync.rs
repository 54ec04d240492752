//! Background Postgres-to-MongoDB mirror sync.
//!
//! Runs on a fixed interval and rewrites every mirrored document from the
//! Postgres tables. The first error aborts the pass; the next tick starts
//! over from the top.

use std::time::Duration;

use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::db::reviews::ReviewRepository;
use crate::db::shipments::ShipmentRepository;
use crate::mongo::MongoMirror;

/// Errors that can abort a sync pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Reading from Postgres failed.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Writing to the mirror failed.
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// Run the mirror sync loop until the task is dropped.
///
/// The first tick fires immediately, so the mirror is populated at
/// startup rather than one interval later.
pub async fn run(pool: PgPool, mirror: MongoMirror, interval_secs: u64) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        ticker.tick().await;

        match sync_pass(&pool, &mirror).await {
            Ok(stats) => info!(
                products = stats.products,
                orders = stats.orders,
                reviews = stats.reviews,
                shipments = stats.shipments,
                "mirror sync pass complete"
            ),
            Err(e) => error!(error = %e, "mirror sync pass failed"),
        }
    }
}

/// Counts of documents written in one pass.
#[derive(Debug, Default)]
struct PassStats {
    products: usize,
    orders: usize,
    reviews: usize,
    shipments: usize,
}

#[instrument(skip(pool, mirror))]
async fn sync_pass(pool: &PgPool, mirror: &MongoMirror) -> Result<PassStats, SyncError> {
    let mut stats = PassStats::default();

    let products = ProductRepository::new(pool).list(None, None).await?;
    for product in &products {
        mirror.upsert_product(product).await?;
    }
    stats.products = products.len();

    let orders_repo = OrderRepository::new(pool);
    let orders = orders_repo.list_all().await?;
    for order in &orders {
        let items = orders_repo.items(order.id).await?;
        mirror.upsert_order(order, &items).await?;
    }
    stats.orders = orders.len();

    let reviews = ReviewRepository::new(pool).list_all().await?;
    for review in &reviews {
        mirror.upsert_review(review).await?;
    }
    stats.reviews = reviews.len();

    let shipments = ShipmentRepository::new(pool).list_all().await?;
    for shipment in &shipments {
        mirror.upsert_shipment(shipment).await?;
    }
    stats.shipments = shipments.len();

    Ok(stats)
}
