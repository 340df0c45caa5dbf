//! User account model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use saree_core::{Email, UserId, Username};

/// A registered customer or admin account.
///
/// The password hash is never serialized; API responses carry the user
/// without it by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Email,
    pub full_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user record.
///
/// The password is already hashed by the time it reaches the store; raw
/// credentials never cross the storage boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
    pub email: Email,
    pub full_name: String,
    pub is_admin: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: UserId::new(1),
            username: Username::parse("priya").unwrap(),
            password_hash: "$argon2id$v=19$secret".to_owned(),
            email: Email::parse("priya@example.com").unwrap(),
            full_name: "Priya Sharma".to_owned(),
            is_admin: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"fullName\":\"Priya Sharma\""));
        assert!(json.contains("\"isAdmin\":false"));
    }
}
