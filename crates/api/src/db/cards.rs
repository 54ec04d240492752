//! Saved card repository for database operations.

use sqlx::PgPool;

use smartbuy_core::{CardId, CustomerId};

use super::{RepositoryError, map_unique_violation};
use crate::models::card::Card;

const CARD_COLUMNS: &str =
    "id, customer_id, brand, last4, exp_month, exp_year, stripe_payment_method, created_at";

/// Fields for saving a new card.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub brand: String,
    pub last4: String,
    pub exp_month: i32,
    pub exp_year: i32,
    pub stripe_payment_method: String,
}

/// Repository for saved card database operations.
pub struct CardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CardRepository<'a> {
    /// Create a new card repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a customer's saved cards, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Card>, RepositoryError> {
        let cards = sqlx::query_as::<_, Card>(&format!(
            "SELECT {CARD_COLUMNS} FROM card WHERE customer_id = $1 ORDER BY created_at"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(cards)
    }

    /// Save a card for a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the payment method is
    /// already saved.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        customer_id: CustomerId,
        new: &NewCard,
    ) -> Result<Card, RepositoryError> {
        let card = sqlx::query_as::<_, Card>(&format!(
            "INSERT INTO card (customer_id, brand, last4, exp_month, exp_year, stripe_payment_method) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {CARD_COLUMNS}"
        ))
        .bind(customer_id)
        .bind(&new.brand)
        .bind(&new.last4)
        .bind(new.exp_month)
        .bind(new.exp_year)
        .bind(&new.stripe_payment_method)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "card already saved"))?;

        Ok(card)
    }

    /// Delete one of a customer's saved cards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the card does not exist
    /// or belongs to a different customer.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_for_customer(
        &self,
        id: CardId,
        customer_id: CustomerId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM card WHERE id = $1 AND customer_id = $2")
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
