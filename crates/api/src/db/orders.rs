//! Order repository for database operations.
//!
//! A customer's cart is simply their newest order with status `pending`;
//! checkout promotes it to `placed`.

use rust_decimal::Decimal;
use sqlx::PgPool;

use smartbuy_core::{CustomerId, OrderId, OrderItemId, OrderStatus, ProductId};

use crate::models::order::{Order, OrderItem};

use super::RepositoryError;

const ORDER_COLUMNS: &str = "id, customer_id, status, total, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every order in the store.
    ///
    /// Used by the mirror sync job.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store_order ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// List a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store_order \
             WHERE customer_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get one of a customer's orders by ID.
    ///
    /// Returns `None` when the order does not exist or belongs to a
    /// different customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_customer(
        &self,
        id: OrderId,
        customer_id: CustomerId,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store_order WHERE id = $1 AND customer_id = $2"
        ))
        .bind(id)
        .bind(customer_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Create a new empty order for a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, customer_id: CustomerId) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO store_order (customer_id) VALUES ($1) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(customer_id)
        .fetch_one(self.pool)
        .await?;

        Ok(order)
    }

    /// Find the customer's newest pending order, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_pending_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store_order \
             WHERE customer_id = $1 AND status = $2 \
             ORDER BY created_at DESC \
             LIMIT 1"
        ))
        .bind(customer_id)
        .bind(OrderStatus::Pending)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Get the customer's newest pending order, creating one if none
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn pending_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Order, RepositoryError> {
        match self.find_pending_for_customer(customer_id).await? {
            Some(order) => Ok(order),
            None => self.create(customer_id).await,
        }
    }

    /// List the line items of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM order_item WHERE order_id = $1 ORDER BY id"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add a line item to an order.
    ///
    /// If the product is already in the order the quantities are summed
    /// rather than creating a second line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add_item(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<OrderItem, RepositoryError> {
        let item = sqlx::query_as::<_, OrderItem>(&format!(
            "INSERT INTO order_item (order_id, product_id, quantity, unit_price) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (order_id, product_id) \
             DO UPDATE SET quantity = order_item.quantity + EXCLUDED.quantity \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    /// Set the quantity of a line item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist
    /// within the given order.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_item_quantity(
        &self,
        order_id: OrderId,
        item_id: OrderItemId,
        quantity: i32,
    ) -> Result<OrderItem, RepositoryError> {
        let item = sqlx::query_as::<_, OrderItem>(&format!(
            "UPDATE order_item SET quantity = $3 \
             WHERE id = $2 AND order_id = $1 \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(order_id)
        .bind(item_id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        item.ok_or(RepositoryError::NotFound)
    }

    /// Remove a line item from an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist
    /// within the given order.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_item(
        &self,
        order_id: OrderId,
        item_id: OrderItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM order_item WHERE id = $2 AND order_id = $1")
            .bind(order_id)
            .bind(item_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Promote a pending order to `placed`, recording its final total.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn place(&self, id: OrderId, total: Decimal) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE store_order SET status = $2, total = $3, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(OrderStatus::Placed)
        .bind(total)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// Set an order's status without a customer scope.
    ///
    /// Used by the payment webhook, which has no session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE store_order SET status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// Set the status of one of a customer's orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist
    /// or belongs to a different customer.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status_for_customer(
        &self,
        id: OrderId,
        customer_id: CustomerId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE store_order SET status = $3, updated_at = now() \
             WHERE id = $1 AND customer_id = $2 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(customer_id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        order.ok_or(RepositoryError::NotFound)
    }

    /// Delete one of a customer's orders along with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist
    /// or belongs to a different customer.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_for_customer(
        &self,
        id: OrderId,
        customer_id: CustomerId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store_order WHERE id = $1 AND customer_id = $2")
            .bind(id)
            .bind(customer_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
