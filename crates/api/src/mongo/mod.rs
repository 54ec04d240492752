//! MongoDB read mirror.
//!
//! Postgres is the source of truth; the mirror holds denormalized copies
//! of the catalog, orders, reviews, and shipments for external readers.
//! Nothing in the API reads back from Mongo, so a stale or unavailable
//! mirror never affects request handling.

pub mod documents;

use mongodb::bson::{Document, doc};
use mongodb::{Client, Database};
use secrecy::ExposeSecret;

use crate::config::MongoConfig;
use crate::models::order::{Order, OrderItem};
use crate::models::product::Product;
use crate::models::review::Review;
use crate::models::shipment::Shipment;

const PRODUCTS: &str = "products";
const ORDERS: &str = "orders";
const REVIEWS: &str = "reviews";
const SHIPMENTS: &str = "shipments";

/// Handle to the mirror database.
#[derive(Clone)]
pub struct MongoMirror {
    db: Database,
}

impl MongoMirror {
    /// Connect to the mirror database.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the connection string is invalid.
    pub async fn connect(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(config.url.expose_secret()).await?;
        let db = client.database(&config.database);
        Ok(Self { db })
    }

    async fn upsert(
        &self,
        collection: &str,
        id: i32,
        document: Document,
    ) -> Result<(), mongodb::error::Error> {
        self.db
            .collection::<Document>(collection)
            .replace_one(doc! { "_id": id }, document)
            .upsert(true)
            .await?;

        Ok(())
    }

    /// Upsert a product into the `products` collection.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the write fails.
    pub async fn upsert_product(&self, product: &Product) -> Result<(), mongodb::error::Error> {
        self.upsert(PRODUCTS, product.id.as_i32(), documents::product(product))
            .await
    }

    /// Upsert an order (with its items embedded) into the `orders`
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the write fails.
    pub async fn upsert_order(
        &self,
        order: &Order,
        items: &[OrderItem],
    ) -> Result<(), mongodb::error::Error> {
        self.upsert(ORDERS, order.id.as_i32(), documents::order(order, items))
            .await
    }

    /// Upsert a review into the `reviews` collection.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the write fails.
    pub async fn upsert_review(&self, review: &Review) -> Result<(), mongodb::error::Error> {
        self.upsert(REVIEWS, review.id.as_i32(), documents::review(review))
            .await
    }

    /// Upsert a shipment into the `shipments` collection.
    ///
    /// # Errors
    ///
    /// Returns `mongodb::error::Error` if the write fails.
    pub async fn upsert_shipment(&self, shipment: &Shipment) -> Result<(), mongodb::error::Error> {
        self.upsert(SHIPMENTS, shipment.id.as_i32(), documents::shipment(shipment))
            .await
    }
}
