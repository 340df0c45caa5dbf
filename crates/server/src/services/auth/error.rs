//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] saree_core::UsernameError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] saree_core::EmailError),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Full name missing from registration.
    #[error("full name is required")]
    MissingFullName,

    /// Wrong username or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Store error.
    #[error("store error: {0}")]
    Store(StoreError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => Self::UserAlreadyExists,
            other => Self::Store(other),
        }
    }
}
