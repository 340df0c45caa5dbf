//! Shopping cart models.

use serde::{Deserialize, Serialize};

use saree_core::{CartItemId, ProductId, UserId};

use crate::error::FieldError;

/// A row in a user's cart.
///
/// Holds only the product reference and quantity; prices are resolved from
/// the catalog when the cart is turned into an order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Payload for adding a product to the cart.
///
/// The user ID comes from the session, never from the request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl NewCartItem {
    /// Validate the payload.
    ///
    /// # Errors
    ///
    /// Returns a field error when the quantity is zero.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        if self.quantity == 0 {
            return Err(vec![FieldError::new(
                "quantity",
                "Quantity must be a positive number",
            )]);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quantity_rejected() {
        let item = NewCartItem {
            product_id: ProductId::new(1),
            quantity: 0,
        };
        assert!(item.validate().is_err());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let item: NewCartItem =
            serde_json::from_str(r#"{"productId": 3, "quantity": 2}"#).unwrap();
        assert_eq!(item.product_id, ProductId::new(3));
        assert_eq!(item.quantity, 2);
    }
}
