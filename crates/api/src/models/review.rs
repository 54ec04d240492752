//! Product review types.

use chrono::{DateTime, Utc};
use smartbuy_core::{CustomerId, ProductId, ReviewId};

/// A product review.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Review {
    /// Unique review ID.
    pub id: ReviewId,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Reviewing customer.
    pub customer_id: CustomerId,
    /// Star rating, 1 through 5.
    pub rating: i32,
    /// Review text.
    pub comment: Option<String>,
    /// When the review was posted.
    pub created_at: DateTime<Utc>,
    /// When the review was last edited.
    pub updated_at: DateTime<Utc>,
}
