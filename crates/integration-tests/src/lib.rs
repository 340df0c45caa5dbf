//! Black-box API tests for Saree Grace.
//!
//! These tests drive a running server over HTTP and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server with an admin account configured
//! SAREE_SESSION_SECRET=$(openssl rand -hex 32) \
//! SAREE_ADMIN_USERNAME=admin \
//! SAREE_ADMIN_PASSWORD=integration-admin-pw \
//! SAREE_ADMIN_EMAIL=admin@sareegrace.example \
//! cargo run -p saree-server &
//!
//! # Run the ignored tests against it
//! cargo test -p saree-integration-tests -- --ignored
//! ```
//!
//! Each test registers its own throwaway user (UUID-suffixed username), so
//! tests are independent and repeatable against a long-running server.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SAREE_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_owned())
}

/// Bootstrap admin username, matching the server's environment.
#[must_use]
pub fn admin_username() -> String {
    std::env::var("SAREE_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_owned())
}

/// Bootstrap admin password, matching the server's environment.
#[must_use]
pub fn admin_password() -> String {
    std::env::var("SAREE_ADMIN_PASSWORD").unwrap_or_else(|_| "integration-admin-pw".to_owned())
}

/// Create a cookie-holding client.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a fresh user and log the client's cookie jar into it.
///
/// Returns the username and the user JSON from registration.
///
/// # Panics
///
/// Panics when registration or login fails.
pub async fn register_and_login(client: &Client) -> (String, Value) {
    let username = format!("it-{}", Uuid::new_v4().simple());
    let base = base_url();

    let resp = client
        .post(format!("{base}/api/auth/register"))
        .json(&json!({
            "username": username,
            "password": "integration-pw-1",
            "email": format!("{username}@example.com"),
            "fullName": "Integration Test",
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), 201, "registration should succeed");
    let user: Value = resp.json().await.expect("Failed to parse user");

    let resp = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "username": username, "password": "integration-pw-1" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), 200, "login should succeed");

    (username, user)
}

/// Log the client's cookie jar into the bootstrap admin account.
///
/// # Panics
///
/// Panics when the login fails (is the server running with
/// `SAREE_ADMIN_USERNAME` set?).
pub async fn login_as_admin(client: &Client) {
    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "username": admin_username(), "password": admin_password() }))
        .send()
        .await
        .expect("Failed to login as admin");
    assert_eq!(
        resp.status(),
        200,
        "admin login should succeed; set SAREE_ADMIN_* to match the server"
    );
}
