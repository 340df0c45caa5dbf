//! Session middleware configuration.
//!
//! Sets up in-process sessions using tower-sessions. Sessions live and die
//! with the process, same as the data store; signing them with the
//! configured secret keeps session IDs untamperable across the proxy
//! boundary.

use secrecy::ExposeSecret;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::Key};

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "saree_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(
    config: &ServerConfig,
) -> SessionManagerLayer<MemoryStore, tower_sessions::service::SignedCookie> {
    let store = MemoryStore::default();

    // Key::derive_from wants at least 32 bytes; config validation enforces
    // that before we get here.
    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
