//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use saree_core::{CategoryId, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{NewProduct, Product, ProductFilter};
use crate::state::AppState;

/// Query parameters for the product listing.
///
/// Flags are only applied when explicitly `true`, mirroring the client
/// which omits them otherwise.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    pub category: Option<CategoryId>,
    pub featured: Option<bool>,
    pub new_arrival: Option<bool>,
    pub best_seller: Option<bool>,
    pub search: Option<String>,
}

impl From<ProductsQuery> for ProductFilter {
    fn from(query: ProductsQuery) -> Self {
        Self {
            category_id: query.category,
            featured: query.featured == Some(true),
            is_new_arrival: query.new_arrival == Some(true),
            is_best_seller: query.best_seller == Some(true),
            search: query.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// `GET /api/products` - list products, optionally filtered.
///
/// # Errors
///
/// 500 if the store is unavailable.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.store().products(&query.into())?))
}

/// `GET /api/products/{id}` - product detail.
///
/// # Errors
///
/// 404 when the product does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .store()
        .product(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))
}

/// `POST /api/products` - create a product (admin).
///
/// # Errors
///
/// 400 on validation failure.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    payload.validate().map_err(AppError::Validation)?;
    let product = state.store().create_product(payload)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}` - replace a product (admin).
///
/// # Errors
///
/// 400 on validation failure, 404 when the product does not exist.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<NewProduct>,
) -> Result<Json<Product>> {
    payload.validate().map_err(AppError::Validation)?;
    state
        .store()
        .update_product(id, payload)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))
}

/// `DELETE /api/products/{id}` - delete a product (admin).
///
/// # Errors
///
/// 404 when the product does not exist.
pub async fn remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    if state.store().delete_product(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Product not found".to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_flags_only_apply_when_true() {
        let filter: ProductFilter = ProductsQuery {
            featured: Some(false),
            ..ProductsQuery::default()
        }
        .into();
        assert!(!filter.featured);

        let filter: ProductFilter = ProductsQuery {
            featured: Some(true),
            new_arrival: Some(true),
            ..ProductsQuery::default()
        }
        .into();
        assert!(filter.featured);
        assert!(filter.is_new_arrival);
        assert!(!filter.is_best_seller);
    }

    #[test]
    fn test_blank_search_dropped() {
        let filter: ProductFilter = ProductsQuery {
            search: Some("   ".to_owned()),
            ..ProductsQuery::default()
        }
        .into();
        assert!(filter.search.is_none());
    }
}
