//! Authentication service.
//!
//! Registration and login against the in-memory store, with argon2 password
//! hashing. Raw passwords never reach the store; they are hashed here and
//! verified here.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;

use saree_core::{Email, Username};

use crate::config::AdminBootstrap;
use crate::models::{NewUser, User};
use crate::store::Store;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
pub struct AuthService<'a> {
    store: &'a Store,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` / `InvalidEmail` /
    /// `WeakPassword` / `MissingFullName` on validation failures and
    /// `AuthError::UserAlreadyExists` when the username is taken.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
        full_name: &str,
    ) -> Result<User, AuthError> {
        let username = Username::parse(username)?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AuthError::MissingFullName);
        }

        let password_hash = hash_password(password)?;

        // Registration always creates a customer; admin accounts are
        // bootstrapped from configuration, never via the public API.
        let user = self.store.create_user(NewUser {
            username,
            password_hash,
            email,
            full_name: full_name.to_owned(),
            is_admin: false,
        })?;

        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the username is unknown
    /// or the password does not match. The two cases are indistinguishable
    /// to the caller.
    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Ok(username) = Username::parse(username) else {
            // A malformed username can never match an account.
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .store
            .user_by_username(&username)
            .map_err(AuthError::Store)?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(user)
    }
}

/// Create the bootstrap admin account from configuration, if one is set
/// and the username is still free.
///
/// # Errors
///
/// Returns `AuthError` when the configured credentials are invalid or the
/// store fails.
pub fn bootstrap_admin(store: &Store, admin: &AdminBootstrap) -> Result<Option<User>, AuthError> {
    let username = Username::parse(&admin.username)?;
    let email = Email::parse(&admin.email)?;
    validate_password(admin.password.expose_secret())?;

    if store
        .user_by_username(&username)
        .map_err(AuthError::Store)?
        .is_some()
    {
        return Ok(None);
    }

    let user = store.create_user(NewUser {
        username,
        password_hash: hash_password(admin.password.expose_secret())?,
        email,
        full_name: admin.full_name.clone(),
        is_admin: true,
    })?;

    tracing::info!(username = %user.username, "bootstrap admin account created");
    Ok(Some(user))
}

/// Hash a password with argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` when the password does not match
/// and `AuthError::PasswordHash` when the stored hash cannot be parsed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Check the password policy.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("silk-and-zari-9").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("silk-and-zari-9", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_and_login() {
        let store = Store::new();
        let auth = AuthService::new(&store);

        let user = auth
            .register("priya", "silk-and-zari-9", "priya@example.com", "Priya Sharma")
            .unwrap();
        assert!(!user.is_admin);

        let logged_in = auth.login("priya", "silk-and-zari-9").unwrap();
        assert_eq!(logged_in.id, user.id);

        assert!(matches!(
            auth.login("priya", "not-the-password"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", "silk-and-zari-9"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_register_rejects_weak_password() {
        let store = Store::new();
        let auth = AuthService::new(&store);
        assert!(matches!(
            auth.register("priya", "short", "priya@example.com", "Priya"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_register_rejects_duplicate_username() {
        let store = Store::new();
        let auth = AuthService::new(&store);
        auth.register("priya", "silk-and-zari-9", "priya@example.com", "Priya")
            .unwrap();
        assert!(matches!(
            auth.register("priya", "another-pass-1", "other@example.com", "Other"),
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[test]
    fn test_bootstrap_admin_is_idempotent() {
        let store = Store::new();
        let admin = AdminBootstrap {
            username: "admin".to_owned(),
            password: SecretString::from("correct-horse-battery".to_owned()),
            email: "admin@sareegrace.example".to_owned(),
            full_name: "Store Admin".to_owned(),
        };

        let created = bootstrap_admin(&store, &admin).unwrap();
        assert!(created.unwrap().is_admin);

        // Second boot with the same config is a no-op.
        assert!(bootstrap_admin(&store, &admin).unwrap().is_none());
    }
}
