//! Admin dashboard route handlers.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{AdminStats, User};
use crate::state::AppState;

/// `GET /api/admin/stats` - dashboard aggregates.
///
/// # Errors
///
/// 401/403 for non-admin callers, 500 if the store is unavailable.
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<AdminStats>> {
    Ok(Json(state.store().admin_stats()?))
}

/// `GET /api/admin/users` - every account, customers and admins alike.
///
/// Password hashes are stripped by the model's serialization.
///
/// # Errors
///
/// 401/403 for non-admin callers, 500 if the store is unavailable.
pub async fn users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>> {
    Ok(Json(state.store().users()?))
}
