//! Cart table operations.
//!
//! Every operation is scoped to one user; a cart row is only visible to and
//! mutable by its owner.

use saree_core::{CartItemId, UserId};

use super::{Store, StoreError, take_id};
use crate::models::{CartItem, NewCartItem};

impl Store {
    /// A user's cart rows, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StoreError> {
        Ok(self
            .read()?
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect())
    }

    /// Add a product to a user's cart.
    ///
    /// If the product is already in the cart the quantities are merged into
    /// the existing row instead of creating a duplicate.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn add_to_cart(&self, user_id: UserId, new: NewCartItem) -> Result<CartItem, StoreError> {
        let mut tables = self.write()?;

        if let Some(existing) = tables
            .cart_items
            .values_mut()
            .find(|item| item.user_id == user_id && item.product_id == new.product_id)
        {
            existing.quantity += new.quantity;
            return Ok(existing.clone());
        }

        let id = take_id(&mut tables.next_cart_item_id);
        let item = CartItem {
            id: CartItemId::new(id),
            user_id,
            product_id: new.product_id,
            quantity: new.quantity,
        };
        tables.cart_items.insert(id, item.clone());
        Ok(item)
    }

    /// Set the quantity of a cart row. Returns `None` when the row does not
    /// exist or belongs to another user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn update_cart_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<Option<CartItem>, StoreError> {
        let mut tables = self.write()?;

        match tables.cart_items.get_mut(&item_id.as_i32()) {
            Some(item) if item.user_id == user_id => {
                item.quantity = quantity;
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    /// Remove a cart row. Returns `false` when the row does not exist or
    /// belongs to another user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn remove_from_cart(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<bool, StoreError> {
        let mut tables = self.write()?;

        let owned = tables
            .cart_items
            .get(&item_id.as_i32())
            .is_some_and(|item| item.user_id == user_id);
        if owned {
            tables.cart_items.remove(&item_id.as_i32());
        }
        Ok(owned)
    }

    /// Remove every cart row belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn clear_cart(&self, user_id: UserId) -> Result<(), StoreError> {
        self.write()?
            .cart_items
            .retain(|_, item| item.user_id != user_id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use saree_core::ProductId;

    use super::*;

    fn item(product: i32, quantity: u32) -> NewCartItem {
        NewCartItem {
            product_id: ProductId::new(product),
            quantity,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let store = Store::new();
        let user = UserId::new(1);

        let first = store.add_to_cart(user, item(7, 1)).unwrap();
        let merged = store.add_to_cart(user, item(7, 2)).unwrap();

        assert_eq!(first.id, merged.id);
        assert_eq!(merged.quantity, 3);
        assert_eq!(store.cart_items(user).unwrap().len(), 1);
    }

    #[test]
    fn test_carts_are_per_user() {
        let store = Store::new();
        store.add_to_cart(UserId::new(1), item(7, 1)).unwrap();
        store.add_to_cart(UserId::new(2), item(7, 5)).unwrap();

        assert_eq!(store.cart_items(UserId::new(1)).unwrap().len(), 1);
        assert_eq!(
            store
                .cart_items(UserId::new(1))
                .unwrap()
                .first()
                .unwrap()
                .quantity,
            1
        );
    }

    #[test]
    fn test_update_rejects_foreign_rows() {
        let store = Store::new();
        let row = store.add_to_cart(UserId::new(1), item(7, 1)).unwrap();

        // Another user cannot touch the row, even with the right ID.
        assert!(
            store
                .update_cart_item(UserId::new(2), row.id, 10)
                .unwrap()
                .is_none()
        );
        assert!(!store.remove_from_cart(UserId::new(2), row.id).unwrap());

        let updated = store
            .update_cart_item(UserId::new(1), row.id, 10)
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 10);
    }

    #[test]
    fn test_clear_cart_only_clears_owner() {
        let store = Store::new();
        store.add_to_cart(UserId::new(1), item(7, 1)).unwrap();
        store.add_to_cart(UserId::new(2), item(8, 1)).unwrap();

        store.clear_cart(UserId::new(1)).unwrap();

        assert!(store.cart_items(UserId::new(1)).unwrap().is_empty());
        assert_eq!(store.cart_items(UserId::new(2)).unwrap().len(), 1);
    }
}
