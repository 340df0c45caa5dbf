//! Cart route handlers.
//!
//! Every handler requires a session; the user ID always comes from the
//! session, so one user can never address another user's cart rows.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use saree_core::CartItemId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CartItem, NewCartItem};
use crate::state::AppState;

/// Quantity update payload.
///
/// Deserialized as a plain integer so that zero and negative values get the
/// storefront's own 400 message instead of a type error.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// `GET /api/cart` - the caller's cart rows.
///
/// # Errors
///
/// 401 when not logged in.
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartItem>>> {
    Ok(Json(state.store().cart_items(user.id)?))
}

/// `POST /api/cart` - add a product to the cart.
///
/// Adding a product already in the cart merges quantities.
///
/// # Errors
///
/// 400 on a zero quantity, 404 when the product does not exist.
pub async fn add(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<NewCartItem>,
) -> Result<(StatusCode, Json<CartItem>)> {
    payload.validate().map_err(AppError::Validation)?;

    if state.store().product(payload.product_id)?.is_none() {
        return Err(AppError::NotFound("Product not found".to_owned()));
    }

    let item = state.store().add_to_cart(user.id, payload)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/cart/{id}` - set a cart row's quantity.
///
/// # Errors
///
/// 400 unless the quantity is a positive number, 404 when the row does not
/// exist or belongs to someone else.
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(item_id): Path<CartItemId>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<CartItem>> {
    let quantity = match payload.quantity {
        Some(q) if q >= 1 => u32::try_from(q)
            .map_err(|_| AppError::BadRequest("Quantity must be a positive number".to_owned()))?,
        _ => {
            return Err(AppError::BadRequest(
                "Quantity must be a positive number".to_owned(),
            ));
        }
    };

    state
        .store()
        .update_cart_item(user.id, item_id, quantity)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_owned()))
}

/// `DELETE /api/cart/{id}` - remove a cart row.
///
/// # Errors
///
/// 404 when the row does not exist or belongs to someone else.
pub async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(item_id): Path<CartItemId>,
) -> Result<StatusCode> {
    if state.store().remove_from_cart(user.id, item_id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Cart item not found".to_owned()))
    }
}
