//! Saved payment card types.
//!
//! Only display metadata is stored; the full card number never touches
//! this system (Stripe holds the payment method).

use chrono::{DateTime, Utc};
use smartbuy_core::{CardId, CustomerId};

/// A saved payment card.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Card {
    /// Unique card ID.
    pub id: CardId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Card brand (e.g., "visa").
    pub brand: String,
    /// Last four digits, for display.
    pub last4: String,
    /// Expiry month (1-12).
    pub exp_month: i32,
    /// Expiry year (four digits).
    pub exp_year: i32,
    /// Stripe payment method identifier.
    pub stripe_payment_method: String,
    /// When the card was saved.
    pub created_at: DateTime<Utc>,
}
