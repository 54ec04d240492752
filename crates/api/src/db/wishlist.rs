//! Wishlist repository for database operations.

use sqlx::PgPool;

use smartbuy_core::{CustomerId, ProductId};

use super::{RepositoryError, map_unique_violation};
use crate::models::wishlist::WishlistItem;

const WISHLIST_COLUMNS: &str = "id, customer_id, product_id, created_at";

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a customer's wishlist, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<WishlistItem>, RepositoryError> {
        let items = sqlx::query_as::<_, WishlistItem>(&format!(
            "SELECT {WISHLIST_COLUMNS} FROM wishlist_item \
             WHERE customer_id = $1 \
             ORDER BY created_at"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add a product to a customer's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is already on
    /// the wishlist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
    ) -> Result<WishlistItem, RepositoryError> {
        let item = sqlx::query_as::<_, WishlistItem>(&format!(
            "INSERT INTO wishlist_item (customer_id, product_id) \
             VALUES ($1, $2) \
             RETURNING {WISHLIST_COLUMNS}"
        ))
        .bind(customer_id)
        .bind(product_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "product already in wishlist"))?;

        Ok(item)
    }

    /// Remove a product from a customer's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product is not on the
    /// wishlist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM wishlist_item WHERE customer_id = $1 AND product_id = $2")
                .bind(customer_id)
                .bind(product_id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
