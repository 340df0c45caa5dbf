//! Product review route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use saree_core::ProductId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{NewReview, Review};
use crate::state::AppState;

/// `GET /api/products/{id}/reviews` - reviews of a product.
///
/// Listing reviews of an unknown product returns an empty list, matching
/// the storefront's lazy tab rendering.
///
/// # Errors
///
/// 500 if the store is unavailable.
pub async fn index(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.store().product_reviews(product_id)?))
}

/// `POST /api/products/{id}/reviews` - post a review (auth).
///
/// Refreshes the product's rating aggregate.
///
/// # Errors
///
/// 400 on validation failure, 404 when the product does not exist.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Json(payload): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>)> {
    payload.validate().map_err(AppError::Validation)?;

    state
        .store()
        .create_review(user.id, product_id, payload)?
        .map(|review| (StatusCode::CREATED, Json(review)))
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))
}
