//! Customer domain types.

use chrono::{DateTime, Utc};
use smartbuy_core::{CustomerId, Email};

/// A registered customer.
///
/// The password hash lives in a separate table and is only loaded by the
/// auth service during login.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Customer's email address (unique, lowercased).
    pub email: Email,
    /// Display name.
    pub full_name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
