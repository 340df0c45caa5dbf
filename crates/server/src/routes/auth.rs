//! Authentication route handlers.
//!
//! Session-cookie auth: login stores the user ID in the session, logout
//! destroys the session. Responses carry the user without the password
//! hash (the model never serializes it).

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, clear_session_user, set_session_user};
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /api/auth/register` - create a customer account.
///
/// # Errors
///
/// 400 on validation failures, 409 when the username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = AuthService::new(state.store()).register(
        &payload.username,
        &payload.password,
        &payload.email,
        &payload.full_name,
    )?;

    tracing::info!(user_id = %user.id, "account registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /api/auth/login` - authenticate and open a session.
///
/// # Errors
///
/// 401 on bad credentials.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<User>> {
    let user = AuthService::new(state.store()).login(&payload.username, &payload.password)?;

    set_session_user(&session, user.id)
        .await
        .map_err(|e| AppError::Internal(format!("failed to write session: {e}")))?;

    tracing::debug!(user_id = %user.id, "login");
    Ok(Json(user))
}

/// `POST /api/auth/logout` - destroy the session.
///
/// Always succeeds for anonymous callers too; logging out twice is fine.
///
/// # Errors
///
/// 500 if the session backend fails.
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_session_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(Json(
        serde_json::json!({ "message": "Logged out successfully" }),
    ))
}

/// `GET /api/auth/user` - the logged-in user.
///
/// # Errors
///
/// 401 when no session is active.
pub async fn current_user(OptionalAuth(user): OptionalAuth) -> Result<Json<User>> {
    user.map(Json)
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_owned()))
}
