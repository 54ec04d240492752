//! Shipment types.

use chrono::{DateTime, Utc};
use smartbuy_core::{OrderId, ShipmentId, ShipmentStatus};

/// A shipment for an order (at most one per order).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Shipment {
    /// Unique shipment ID.
    pub id: ShipmentId,
    /// Order being shipped.
    pub order_id: OrderId,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: String,
    /// Delivery progress.
    pub status: ShipmentStatus,
    /// Set when the shipment leaves the warehouse.
    pub shipped_at: Option<DateTime<Utc>>,
    /// When the shipment record was created.
    pub created_at: DateTime<Utc>,
    /// When the shipment was last updated.
    pub updated_at: DateTime<Utc>,
}
