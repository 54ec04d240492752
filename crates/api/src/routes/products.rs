//! Product catalog handlers.
//!
//! Listing and detail are public; mutations require a logged-in customer.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use smartbuy_core::ProductId;

use crate::db::products::{NewProduct, ProductRepository, UpdateProduct};
use crate::db::reviews::ReviewRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::product::Product;
use crate::state::AppState;

use super::reviews::ReviewResponse;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Request body for creating or updating a product.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: Option<String>,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Product details returned to clients.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub stock: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            currency: product.currency,
            stock: product.stock,
            image_url: product.image_url,
            category: product.category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

fn validate(req: &ProductRequest) -> Result<()> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "product name must not be empty".to_string(),
        ));
    }
    if req.price < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "price must not be negative".to_string(),
        ));
    }
    if req.stock < 0 {
        return Err(AppError::BadRequest(
            "stock must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// List products, optionally filtered by category and name search.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProductResponse>>> {
    let products = ProductRepository::new(state.pool())
        .list(query.category.as_deref(), query.search.as_deref())
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Get a single product.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product.into()))
}

/// Create a product.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_customer): RequireAuth,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    validate(&req)?;

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            name: req.name,
            description: req.description,
            price: req.price,
            currency: req.currency.unwrap_or_else(|| "usd".to_string()),
            stock: req.stock,
            image_url: req.image_url,
            category: req.category,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Update a product, replacing every field.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_customer): RequireAuth,
    Path(id): Path<ProductId>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    validate(&req)?;

    let product = ProductRepository::new(state.pool())
        .update(
            id,
            &UpdateProduct {
                name: req.name,
                description: req.description,
                price: req.price,
                currency: req.currency.unwrap_or_else(|| "usd".to_string()),
                stock: req.stock,
                image_url: req.image_url,
                category: req.category,
            },
        )
        .await?;

    Ok(Json(product.into()))
}

/// Delete a product.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(_customer): RequireAuth,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool()).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List a product's reviews, newest first.
pub async fn reviews(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<ReviewResponse>>> {
    let pool = state.pool();

    ProductRepository::new(pool)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let reviews = ReviewRepository::new(pool).list_for_product(id).await?;

    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}
