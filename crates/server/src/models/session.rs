//! Session keys.
//!
//! Only the user ID is stored in the session; the full user record is
//! re-loaded from the store on every authenticated request so that admin
//! revocation and profile changes take effect immediately.

/// Session keys for authentication data.
pub mod keys {
    /// Key for the logged-in user's ID.
    pub const CURRENT_USER_ID: &str = "current_user_id";
}
