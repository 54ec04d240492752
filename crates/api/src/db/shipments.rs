//! Shipment repository for database operations.

use sqlx::PgPool;

use smartbuy_core::{OrderId, ShipmentId, ShipmentStatus};

use super::{RepositoryError, map_unique_violation};
use crate::models::shipment::Shipment;

const SHIPMENT_COLUMNS: &str = "id, order_id, address, city, country, postal_code, status, \
                                shipped_at, created_at, updated_at";

/// Fields for creating a shipment.
#[derive(Debug, Clone)]
pub struct NewShipment {
    pub order_id: OrderId,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
}

/// Repository for shipment database operations.
pub struct ShipmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShipmentRepository<'a> {
    /// Create a new shipment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every shipment in the store.
    ///
    /// Used by the mirror sync job.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Shipment>, RepositoryError> {
        let shipments = sqlx::query_as::<_, Shipment>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipment ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(shipments)
    }

    /// Get the shipment for an order, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<Shipment>, RepositoryError> {
        let shipment = sqlx::query_as::<_, Shipment>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipment WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(shipment)
    }

    /// Get a shipment by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShipmentId) -> Result<Option<Shipment>, RepositoryError> {
        let shipment = sqlx::query_as::<_, Shipment>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipment WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(shipment)
    }

    /// Create a shipment for an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order already has a
    /// shipment.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewShipment) -> Result<Shipment, RepositoryError> {
        let shipment = sqlx::query_as::<_, Shipment>(&format!(
            "INSERT INTO shipment (order_id, address, city, country, postal_code) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SHIPMENT_COLUMNS}"
        ))
        .bind(new.order_id)
        .bind(&new.address)
        .bind(&new.city)
        .bind(&new.country)
        .bind(&new.postal_code)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "shipment already exists for order"))?;

        Ok(shipment)
    }

    /// Set a shipment's status.
    ///
    /// The first transition into `shipped` stamps `shipped_at`; later
    /// status changes leave the timestamp alone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shipment does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status(
        &self,
        id: ShipmentId,
        status: ShipmentStatus,
    ) -> Result<Shipment, RepositoryError> {
        let shipment = sqlx::query_as::<_, Shipment>(&format!(
            "UPDATE shipment \
             SET status = $2, \
                 shipped_at = CASE \
                     WHEN $2::text = 'shipped' AND shipped_at IS NULL THEN now() \
                     ELSE shipped_at \
                 END, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {SHIPMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        shipment.ok_or(RepositoryError::NotFound)
    }
}
