//! Order handlers.
//!
//! All operations are scoped to the session customer; an order belonging
//! to someone else is indistinguishable from a missing one.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use smartbuy_core::{OrderId, OrderItemId, OrderStatus, ProductId};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::order::{Order, OrderItem};
use crate::state::AppState;

/// A line item as returned to clients.
#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

/// An order with its items as returned to clients.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderResponse {
    pub fn from_parts(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            status: order.status,
            total: order.total,
            items: items.into_iter().map(Into::into).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Request body for setting an order's status.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

/// List the customer's orders, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Vec<OrderResponse>>> {
    let repo = OrderRepository::new(state.pool());
    let orders = repo.list_for_customer(customer.id).await?;

    let mut responses = Vec::with_capacity(orders.len());
    for order in orders {
        let items = repo.items(order.id).await?;
        responses.push(OrderResponse::from_parts(order, items));
    }

    Ok(Json(responses))
}

/// Get one of the customer's orders with its items.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get_for_customer(id, customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    let items = repo.items(order.id).await?;

    Ok(Json(OrderResponse::from_parts(order, items)))
}

/// Create a new empty pending order.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let order = OrderRepository::new(state.pool())
        .create(customer.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse::from_parts(order, Vec::new())),
    ))
}

/// Set an order's status.
///
/// The status is a plain label; no transition rules are enforced.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<OrderId>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<OrderResponse>> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .set_status_for_customer(id, customer.id, req.status)
        .await?;
    let items = repo.items(order.id).await?;

    Ok(Json(OrderResponse::from_parts(order, items)))
}

/// Delete an order and its items.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<StatusCode> {
    OrderRepository::new(state.pool())
        .delete_for_customer(id, customer.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
