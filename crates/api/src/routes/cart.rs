//! Cart handlers.
//!
//! The cart is the customer's newest `pending` order. Reading or adding to
//! the cart creates the pending order on demand; item updates and checkout
//! require one to already exist.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use smartbuy_core::{OrderId, OrderItemId, ProductId};

use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::order::OrderItem;
use crate::state::AppState;

use super::orders::{OrderItemResponse, OrderResponse};

/// Request body for adding an item to the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Request body for changing an item's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i32,
}

/// The cart as returned to clients.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub order_id: OrderId,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: Decimal,
}

impl CartResponse {
    fn from_parts(order_id: OrderId, items: Vec<OrderItem>) -> Self {
        let subtotal = subtotal(&items);
        Self {
            order_id,
            items: items.into_iter().map(Into::into).collect(),
            subtotal,
        }
    }
}

fn subtotal(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum()
}

fn validate_quantity(quantity: i32) -> Result<()> {
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Get the cart, creating the pending order if the customer has none.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<CartResponse>> {
    let repo = OrderRepository::new(state.pool());
    let order = repo.pending_for_customer(customer.id).await?;
    let items = repo.items(order.id).await?;

    Ok(Json(CartResponse::from_parts(order.id, items)))
}

/// Add a product to the cart.
///
/// Adding a product already in the cart sums the quantities. The unit
/// price is captured from the product at the time of adding.
pub async fn add_item(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>)> {
    validate_quantity(req.quantity)?;

    let pool = state.pool();
    let product = ProductRepository::new(pool)
        .get(req.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", req.product_id)))?;

    let repo = OrderRepository::new(pool);
    let order = repo.pending_for_customer(customer.id).await?;
    repo.add_item(order.id, product.id, req.quantity, product.price)
        .await?;
    let items = repo.items(order.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CartResponse::from_parts(order.id, items)),
    ))
}

/// Set the quantity of a cart item.
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(item_id): Path<OrderItemId>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>> {
    validate_quantity(req.quantity)?;

    let repo = OrderRepository::new(state.pool());
    let order = repo
        .find_pending_for_customer(customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound("no pending order".to_string()))?;

    repo.update_item_quantity(order.id, item_id, req.quantity)
        .await?;
    let items = repo.items(order.id).await?;

    Ok(Json(CartResponse::from_parts(order.id, items)))
}

/// Remove an item from the cart.
pub async fn remove_item(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(item_id): Path<OrderItemId>,
) -> Result<Json<CartResponse>> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .find_pending_for_customer(customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound("no pending order".to_string()))?;

    repo.remove_item(order.id, item_id).await?;
    let items = repo.items(order.id).await?;

    Ok(Json(CartResponse::from_parts(order.id, items)))
}

/// Place the pending order.
///
/// Stock is checked and decremented per item as the loop runs; there is no
/// transaction around the whole pass, so a failure partway leaves earlier
/// decrements in place.
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<OrderResponse>> {
    let pool = state.pool();
    let orders = OrderRepository::new(pool);
    let products = ProductRepository::new(pool);

    let order = orders
        .find_pending_for_customer(customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound("no pending order".to_string()))?;

    let items = orders.items(order.id).await?;
    if items.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    for item in &items {
        let product = products
            .get(item.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {}", item.product_id)))?;

        if product.stock < item.quantity {
            return Err(AppError::BadRequest(format!(
                "insufficient stock for {}",
                product.name
            )));
        }

        products
            .decrement_stock(item.product_id, item.quantity)
            .await?;
    }

    let total = subtotal(&items);
    let placed = orders.place(order.id, total).await?;

    add_breadcrumb(
        "cart",
        "Checked out cart",
        Some(&[("order_id", &placed.id.to_string())]),
    );

    Ok(Json(OrderResponse::from_parts(placed, items)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i32, unit_price: &str) -> OrderItem {
        OrderItem {
            id: OrderItemId::new(1),
            order_id: OrderId::new(1),
            product_id: ProductId::new(1),
            quantity,
            unit_price: unit_price.parse().expect("valid decimal"),
        }
    }

    #[test]
    fn subtotal_sums_quantity_times_unit_price() {
        let items = vec![item(2, "10.00"), item(3, "2.50")];
        assert_eq!(subtotal(&items), "27.50".parse::<Decimal>().expect("valid"));
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() {
        assert_eq!(subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1).is_ok());
    }
}
