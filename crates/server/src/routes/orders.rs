//! Order route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use saree_core::{OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::{NewOrder, Order};
use crate::state::AppState;

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    /// With an admin session, `all=true` lists every order in the store.
    #[serde(default)]
    pub all: Option<bool>,
}

/// Status update payload.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /api/orders` - the caller's orders, or all orders for an admin
/// requesting `?all=true`.
///
/// # Errors
///
/// 401 when not logged in.
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<Order>>> {
    let orders = if user.is_admin && query.all == Some(true) {
        state.store().orders()?
    } else {
        state.store().user_orders(user.id)?
    };
    Ok(Json(orders))
}

/// `GET /api/orders/{id}` - order detail, for the owner or an admin.
///
/// # Errors
///
/// 404 when the order does not exist, 403 when the caller is neither the
/// owner nor an admin.
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = state
        .store()
        .order(id)?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    if order.user_id != user.id && !user.is_admin {
        return Err(AppError::Forbidden("Forbidden".to_owned()));
    }

    Ok(Json(order))
}

/// `POST /api/orders` - place an order from the caller's cart.
///
/// Snapshots each cart row's unit price into an order item, then empties
/// the cart.
///
/// # Errors
///
/// 400 on validation failure or an empty cart.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    payload.validate().map_err(AppError::Validation)?;

    let cart_items = state.store().cart_items(user.id)?;
    if cart_items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_owned()));
    }

    let order = state.store().create_order(user.id, payload, &cart_items)?;
    state.store().clear_cart(user.id)?;

    tracing::info!(order_id = %order.id, user_id = %user.id, total = %order.total, "order placed");
    Ok((StatusCode::CREATED, Json(order)))
}

/// `PUT /api/orders/{id}/status` - set an order's status (admin).
///
/// # Errors
///
/// 400 when the status is missing or unknown, 404 when the order does not
/// exist.
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let Some(raw) = payload.status else {
        return Err(AppError::BadRequest("Status is required".to_owned()));
    };
    let status: OrderStatus = raw
        .parse()
        .map_err(|e: saree_core::OrderStatusError| AppError::BadRequest(e.to_string()))?;

    state
        .store()
        .update_order_status(id, status)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))
}
