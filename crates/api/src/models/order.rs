//! Order domain types.
//!
//! An order with status `pending` doubles as the customer's shopping cart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smartbuy_core::{CustomerId, OrderId, OrderItemId, OrderStatus, ProductId};

/// An order header row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Lifecycle status (no transition validation).
    pub status: OrderStatus,
    /// Total across items, recomputed at checkout.
    pub total: Decimal,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A line item within an order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItem {
    /// Unique item ID.
    pub id: OrderItemId,
    /// Parent order.
    pub order_id: OrderId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i32,
    /// Price per unit at the time the item was added.
    pub unit_price: Decimal,
}
