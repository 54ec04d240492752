//! Wishlist types.

use chrono::{DateTime, Utc};
use smartbuy_core::{CustomerId, ProductId, WishlistItemId};

/// A wishlist entry (unique per customer and product).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WishlistItem {
    /// Unique entry ID.
    pub id: WishlistItemId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Wished-for product.
    pub product_id: ProductId,
    /// When the product was added.
    pub created_at: DateTime<Utc>,
}
