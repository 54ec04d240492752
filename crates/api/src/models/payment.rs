//! Payment tracking types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smartbuy_core::{OrderId, PaymentId, PaymentStatus};

/// A payment attempt against an order, tracking a Stripe `PaymentIntent`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Payment {
    /// Unique payment ID.
    pub id: PaymentId,
    /// Order being paid for.
    pub order_id: OrderId,
    /// Stripe `PaymentIntent` identifier.
    pub stripe_payment_intent: String,
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Local view of the intent's state.
    pub status: PaymentStatus,
    /// When the payment record was created.
    pub created_at: DateTime<Utc>,
    /// When the payment was last updated.
    pub updated_at: DateTime<Utc>,
}
