//! User table operations.

use chrono::Utc;

use saree_core::{UserId, Username};

use super::{Store, StoreError, take_id};
use crate::models::{NewUser, User};

impl Store {
    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.get(&id.as_i32()).cloned())
    }

    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn user_by_username(&self, username: &Username) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|user| user.username == *username)
            .cloned())
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` when the username is already taken.
    pub fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut tables = self.write()?;

        if tables
            .users
            .values()
            .any(|user| user.username == new.username)
        {
            return Err(StoreError::Conflict(format!(
                "username {} is already taken",
                new.username
            )));
        }

        let id = take_id(&mut tables.next_user_id);
        let user = User {
            id: UserId::new(id),
            username: new.username,
            password_hash: new.password_hash,
            email: new.email,
            full_name: new.full_name,
            is_admin: new.is_admin,
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    /// All users, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read()?.users.values().cloned().collect())
    }
}
