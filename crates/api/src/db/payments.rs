//! Payment repository for database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use smartbuy_core::{OrderId, PaymentStatus};

use super::{RepositoryError, map_unique_violation};
use crate::models::payment::Payment;

const PAYMENT_COLUMNS: &str = "id, order_id, stripe_payment_intent, amount, currency, status, \
                               created_at, updated_at";

/// Repository for payment database operations.
pub struct PaymentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRepository<'a> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a payment attempt against an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the `PaymentIntent` is
    /// already recorded.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        order_id: OrderId,
        stripe_payment_intent: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<Payment, RepositoryError> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payment (order_id, stripe_payment_intent, amount, currency) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(order_id)
        .bind(stripe_payment_intent)
        .bind(amount)
        .bind(currency)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "payment intent already recorded"))?;

        Ok(payment)
    }

    /// Get the most recent payment for an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<Payment>, RepositoryError> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payment \
             WHERE order_id = $1 \
             ORDER BY created_at DESC \
             LIMIT 1"
        ))
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(payment)
    }

    /// Set a payment's status, looked up by its `PaymentIntent` ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no payment records the
    /// given intent.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_status_by_intent(
        &self,
        stripe_payment_intent: &str,
        status: PaymentStatus,
    ) -> Result<Payment, RepositoryError> {
        let payment = sqlx::query_as::<_, Payment>(&format!(
            "UPDATE payment SET status = $2, updated_at = now() \
             WHERE stripe_payment_intent = $1 \
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(stripe_payment_intent)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        payment.ok_or(RepositoryError::NotFound)
    }
}
