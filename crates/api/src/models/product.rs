//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smartbuy_core::ProductId;

/// A catalog product.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Unit price in the currency's standard unit.
    pub price: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Units in stock.
    pub stock: i32,
    /// Primary image URL.
    pub image_url: Option<String>,
    /// Category label used for filtering.
    pub category: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
