//! Product review handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartbuy_core::{CustomerId, ProductId, ReviewId};

use crate::db::products::ProductRepository;
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::review::Review;
use crate::state::AppState;

/// Request body for posting a review.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub product_id: ProductId,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Request body for editing a review.
#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

/// A review as returned to clients.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub customer_id: CustomerId,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            product_id: review.product_id,
            customer_id: review.customer_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

fn validate_rating(rating: i32) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

/// Get a single review.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
) -> Result<Json<ReviewResponse>> {
    let review = ReviewRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("review {id}")))?;

    Ok(Json(review.into()))
}

/// Post a review for a product.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>)> {
    validate_rating(req.rating)?;

    let pool = state.pool();
    ProductRepository::new(pool)
        .get(req.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", req.product_id)))?;

    let review = ReviewRepository::new(pool)
        .create(
            req.product_id,
            customer.id,
            req.rating,
            req.comment.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(review.into())))
}

/// Edit one of the customer's own reviews.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<ReviewId>,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>> {
    validate_rating(req.rating)?;

    let review = ReviewRepository::new(state.pool())
        .update(id, customer.id, req.rating, req.comment.as_deref())
        .await?;

    Ok(Json(review.into()))
}

/// Delete one of the customer's own reviews.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(id): Path<ReviewId>,
) -> Result<StatusCode> {
    ReviewRepository::new(state.pool())
        .delete(id, customer.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
