//! Review repository for database operations.

use sqlx::PgPool;

use smartbuy_core::{CustomerId, ProductId, ReviewId};

use super::RepositoryError;
use crate::models::review::Review;

const REVIEW_COLUMNS: &str =
    "id, product_id, customer_id, rating, comment, created_at, updated_at";

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a review by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM review WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(review)
    }

    /// List every review in the store.
    ///
    /// Used by the mirror sync job.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM review ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// List the reviews of a product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM review \
             WHERE product_id = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    /// Post a review for a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        product_id: ProductId,
        customer_id: CustomerId,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO review (product_id, customer_id, rating, comment) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(product_id)
        .bind(customer_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(self.pool)
        .await?;

        Ok(review)
    }

    /// Edit one of a customer's reviews.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review does not exist
    /// or belongs to a different customer.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ReviewId,
        customer_id: CustomerId,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, RepositoryError> {
        let review = sqlx::query_as::<_, Review>(&format!(
            "UPDATE review SET rating = $3, comment = $4, updated_at = now() \
             WHERE id = $1 AND customer_id = $2 \
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(id)
        .bind(customer_id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(self.pool)
        .await?;

        review.ok_or(RepositoryError::NotFound)
    }

    /// Delete one of a customer's reviews.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review does not exist
    /// or belongs to a different customer.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(
        &self,
        id: ReviewId,
        customer_id: CustomerId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM review WHERE id = $1 AND customer_id = $2")
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
