//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Every error body is JSON of the shape
//! `{"message": ...}`; for validation failures `message` is an array of
//! `{path, message}` objects, matching what the browser client expects.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::store::StoreError;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Request field path (camelCase, as sent on the wire).
    pub path: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Application-level error type for the storefront backend.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Request body failed validation.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but lacks permission.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Malformed or unacceptable request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for a single-field validation failure.
    #[must_use]
    pub fn field(path: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(path, message)])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry before the details are masked
        if matches!(self, Self::Store(StoreError::Poisoned) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Store(StoreError::Poisoned) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::InvalidUsername(_)
                | AuthError::InvalidEmail(_)
                | AuthError::WeakPassword(_)
                | AuthError::MissingFullName => StatusCode::BAD_REQUEST,
                AuthError::Store(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Store(StoreError::Poisoned) | Self::Internal(_) => {
                serde_json::Value::String("Server error".to_owned())
            }
            Self::Store(StoreError::Conflict(detail)) => serde_json::Value::String(detail),
            Self::Auth(err) => {
                let text = match err {
                    AuthError::InvalidCredentials => "Invalid credentials".to_owned(),
                    AuthError::UserAlreadyExists => {
                        "An account with this username already exists".to_owned()
                    }
                    AuthError::InvalidUsername(e) => e.to_string(),
                    AuthError::InvalidEmail(e) => e.to_string(),
                    AuthError::WeakPassword(msg) => msg,
                    AuthError::MissingFullName => "Full name is required".to_owned(),
                    AuthError::Store(_) | AuthError::PasswordHash => "Server error".to_owned(),
                };
                serde_json::Value::String(text)
            }
            Self::Validation(errors) => {
                serde_json::to_value(errors).unwrap_or_else(|_| {
                    serde_json::Value::String("Validation failed".to_owned())
                })
            }
            Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::BadRequest(msg) => serde_json::Value::String(msg),
        };

        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("Product not found".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("Unauthorized".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Forbidden("Forbidden".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::field("quantity", "must be positive")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::WeakPassword(
                "Password must be at least 8 characters".into()
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_conflict_is_409() {
        assert_eq!(
            status_of(AppError::Store(StoreError::Conflict(
                "category slug silk is already in use".into()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Store(StoreError::Poisoned)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_leaked() {
        let response = AppError::Internal("secret connection string".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Body is the generic message; the detail only goes to logs/Sentry.
    }
}
