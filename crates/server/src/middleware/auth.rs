//! Authentication extractors.
//!
//! The session carries only the user ID; these extractors re-load the full
//! user from the store on each request, so an account that loses its admin
//! flag (or is deleted) is locked out immediately.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use saree_core::UserId;

use crate::error::AppError;
use crate::models::User;
use crate::models::session::keys;
use crate::state::AppState;

/// Look up the session user, swallowing every failure into `None`.
async fn session_user(parts: &mut Parts, state: &AppState) -> Option<User> {
    let session = parts.extensions.get::<Session>()?;
    let user_id: UserId = session.get(keys::CURRENT_USER_ID).await.ok().flatten()?;
    state.store().user(user_id).ok().flatten()
}

/// Extractor that requires a logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     Json(user)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_user(parts, state)
            .await
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_owned()))
    }
}

/// Extractor that requires a logged-in admin.
///
/// Anonymous callers get 401; authenticated non-admins get 403.
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = session_user(parts, state)
            .await
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_owned()))?;

        if user.is_admin {
            Ok(Self(user))
        } else {
            Err(AppError::Forbidden("Forbidden".to_owned()))
        }
    }
}

/// Extractor that optionally gets the current user.
///
/// Never rejects; anonymous requests extract as `None`.
pub struct OptionalAuth(pub Option<User>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts, state).await))
    }
}

/// Record the logged-in user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_session_user(
    session: &Session,
    user_id: UserId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CURRENT_USER_ID, user_id).await
}

/// Drop the whole session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be destroyed.
pub async fn clear_session_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
