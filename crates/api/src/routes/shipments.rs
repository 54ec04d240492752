//! Shipment handlers.
//!
//! A shipment is reachable only through an order the session customer
//! owns, so ownership is checked against the order on every operation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartbuy_core::{OrderId, ShipmentId, ShipmentStatus};

use crate::db::orders::OrderRepository;
use crate::db::shipments::{NewShipment, ShipmentRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::shipment::Shipment;
use crate::state::AppState;

/// Request body for creating a shipment.
#[derive(Debug, Deserialize)]
pub struct CreateShipmentRequest {
    pub order_id: OrderId,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
}

/// Request body for setting a shipment's status.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: ShipmentStatus,
}

/// A shipment as returned to clients.
#[derive(Debug, Serialize)]
pub struct ShipmentResponse {
    pub id: ShipmentId,
    pub order_id: OrderId,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub status: ShipmentStatus,
    pub shipped_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Shipment> for ShipmentResponse {
    fn from(shipment: Shipment) -> Self {
        Self {
            id: shipment.id,
            order_id: shipment.order_id,
            address: shipment.address,
            city: shipment.city,
            country: shipment.country,
            postal_code: shipment.postal_code,
            status: shipment.status,
            shipped_at: shipment.shipped_at,
            created_at: shipment.created_at,
            updated_at: shipment.updated_at,
        }
    }
}

fn validate(req: &CreateShipmentRequest) -> Result<()> {
    for (field, value) in [
        ("address", &req.address),
        ("city", &req.city),
        ("country", &req.country),
        ("postal_code", &req.postal_code),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} must not be empty")));
        }
    }
    Ok(())
}

/// Get the shipment for one of the customer's orders.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(order_id): Path<OrderId>,
) -> Result<Json<ShipmentResponse>> {
    let pool = state.pool();
    OrderRepository::new(pool)
        .get_for_customer(order_id, customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    let shipment = ShipmentRepository::new(pool)
        .get_for_order(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shipment for order {order_id}")))?;

    Ok(Json(shipment.into()))
}

/// Create a shipment for one of the customer's orders.
///
/// At most one shipment exists per order; a second create is a 409.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(req): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<ShipmentResponse>)> {
    validate(&req)?;

    let pool = state.pool();
    OrderRepository::new(pool)
        .get_for_customer(req.order_id, customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {}", req.order_id)))?;

    let shipment = ShipmentRepository::new(pool)
        .create(&NewShipment {
            order_id: req.order_id,
            address: req.address,
            city: req.city,
            country: req.country,
            postal_code: req.postal_code,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(shipment.into())))
}

/// Set a shipment's status.
///
/// Moving to `shipped` stamps `shipped_at` the first time.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<ShipmentId>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<ShipmentResponse>> {
    let pool = state.pool();
    let repo = ShipmentRepository::new(pool);

    let shipment = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shipment {id}")))?;

    OrderRepository::new(pool)
        .get_for_customer(shipment.order_id, customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shipment {id}")))?;

    let shipment = repo.set_status(id, req.status).await?;

    Ok(Json(shipment.into()))
}
