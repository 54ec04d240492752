//! Wishlist handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smartbuy_core::{ProductId, WishlistItemId};

use crate::db::products::ProductRepository;
use crate::db::wishlist::WishlistRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::wishlist::WishlistItem;
use crate::state::AppState;

/// Request body for adding a product to the wishlist.
#[derive(Debug, Deserialize)]
pub struct AddWishlistRequest {
    pub product_id: ProductId,
}

/// A wishlist entry as returned to clients.
#[derive(Debug, Serialize)]
pub struct WishlistItemResponse {
    pub id: WishlistItemId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

impl From<WishlistItem> for WishlistItemResponse {
    fn from(item: WishlistItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            created_at: item.created_at,
        }
    }
}

/// List the customer's wishlist.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
) -> Result<Json<Vec<WishlistItemResponse>>> {
    let items = WishlistRepository::new(state.pool())
        .list_for_customer(customer.id)
        .await?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Add a product to the wishlist.
///
/// Adding a product twice is a 409.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(req): Json<AddWishlistRequest>,
) -> Result<(StatusCode, Json<WishlistItemResponse>)> {
    let pool = state.pool();
    ProductRepository::new(pool)
        .get(req.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", req.product_id)))?;

    let item = WishlistRepository::new(pool)
        .add(customer.id, req.product_id)
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Remove a product from the wishlist.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Path(product_id): Path<ProductId>,
) -> Result<StatusCode> {
    WishlistRepository::new(state.pool())
        .remove(customer.id, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
