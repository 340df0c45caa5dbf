//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use saree_core::CategoryId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Category, NewCategory};
use crate::state::AppState;

/// `GET /api/categories` - list all categories.
///
/// # Errors
///
/// 500 if the store is unavailable.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.store().categories()?))
}

/// `GET /api/categories/{id}` - category detail.
///
/// # Errors
///
/// 404 when the category does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>> {
    state
        .store()
        .category(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Category not found".to_owned()))
}

/// `POST /api/categories` - create a category (admin).
///
/// # Errors
///
/// 400 on validation failure, 409 on a duplicate slug.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>)> {
    payload.validate().map_err(AppError::Validation)?;
    let category = state.store().create_category(payload)?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /api/categories/{id}` - replace a category (admin).
///
/// # Errors
///
/// 400 on validation failure, 404 when the category does not exist,
/// 409 when the slug belongs to another category.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(payload): Json<NewCategory>,
) -> Result<Json<Category>> {
    payload.validate().map_err(AppError::Validation)?;
    state
        .store()
        .update_category(id, payload)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Category not found".to_owned()))
}

/// `DELETE /api/categories/{id}` - delete a category (admin).
///
/// # Errors
///
/// 404 when the category does not exist.
pub async fn remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode> {
    if state.store().delete_category(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Category not found".to_owned()))
    }
}
