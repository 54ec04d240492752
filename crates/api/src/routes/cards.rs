//! Saved card handlers.
//!
//! Only display metadata is accepted; the payment method itself lives in
//! Stripe and is referenced by its identifier.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartbuy_core::CardId;

use crate::db::cards::{CardRepository, NewCard};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::card::Card;
use crate::state::AppState;

/// Request body for saving a card.
#[derive(Debug, Deserialize)]
pub struct CardRequest {
    pub brand: String,
    pub last4: String,
    pub exp_month: i32,
    pub exp_year: i32,
    pub stripe_payment_method: String,
}

/// A saved card as returned to clients.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub id: CardId,
    pub brand: String,
    pub last4: String,
    pub exp_month: i32,
    pub exp_year: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            brand: card.brand,
            last4: card.last4,
            exp_month: card.exp_month,
            exp_year: card.exp_year,
            created_at: card.created_at,
        }
    }
}

fn validate(req: &CardRequest) -> Result<()> {
    if req.last4.len() != 4 || !req.last4.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "last4 must be exactly four digits".to_string(),
        ));
    }
    if !(1..=12).contains(&req.exp_month) {
        return Err(AppError::BadRequest(
            "exp_month must be between 1 and 12".to_string(),
        ));
    }
    if req.stripe_payment_method.is_empty() {
        return Err(AppError::BadRequest(
            "stripe_payment_method must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// List the customer's saved cards.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Vec<CardResponse>>> {
    let cards = CardRepository::new(state.pool())
        .list_for_customer(customer.id)
        .await?;

    Ok(Json(cards.into_iter().map(Into::into).collect()))
}

/// Save a card for the customer.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(req): Json<CardRequest>,
) -> Result<(StatusCode, Json<CardResponse>)> {
    validate(&req)?;

    let card = CardRepository::new(state.pool())
        .create(
            customer.id,
            &NewCard {
                brand: req.brand,
                last4: req.last4,
                exp_month: req.exp_month,
                exp_year: req.exp_year,
                stripe_payment_method: req.stripe_payment_method,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(card.into())))
}

/// Delete one of the customer's cards.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<CardId>,
) -> Result<StatusCode> {
    CardRepository::new(state.pool())
        .delete_for_customer(id, customer.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
