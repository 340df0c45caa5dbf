//! Order and order item models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saree_core::{OrderId, OrderItemId, OrderStatus, PaymentMethod, ProductId, UserId};

use crate::error::FieldError;

/// A placed order.
///
/// The total is the checkout figure (cart plus shipping) at placement time;
/// later catalog edits never change it. Line items live in [`OrderItem`]
/// rows keyed by `order_id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// A single line of an order.
///
/// `price` is the unit price snapshot taken when the order was placed
/// (discount price when one was set).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

/// Checkout payload for placing an order.
///
/// The user ID comes from the session; the cart contents come from the
/// store, not the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub total: Decimal,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
}

impl NewOrder {
    /// Validate the payload, collecting one error per offending field.
    ///
    /// # Errors
    ///
    /// Returns the collected field errors when any check fails.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.total < Decimal::ZERO {
            errors.push(FieldError::new("total", "Total must not be negative"));
        }
        if self.shipping_address.trim().is_empty() {
            errors.push(FieldError::new(
                "shippingAddress",
                "Shipping address is required",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
