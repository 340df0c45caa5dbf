//! Order table operations.
//!
//! Order placement is the one multi-table operation in the store: it turns a
//! set of cart rows into an order plus order items, snapshotting each
//! product's effective unit price so later catalog edits never rewrite
//! history. Stock is not decremented.

use chrono::Utc;

use saree_core::{OrderId, OrderItemId, OrderStatus, UserId};

use super::{Store, StoreError, take_id};
use crate::models::{CartItem, NewOrder, Order, OrderItem, Product};

impl Store {
    /// All orders, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.read()?.orders.values().cloned().collect())
    }

    /// One user's orders, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn user_orders(&self, user_id: UserId) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .read()?
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.read()?.orders.get(&id.as_i32()).cloned())
    }

    /// Place an order from a set of cart rows.
    ///
    /// For each cart row the product's current effective price (discount
    /// price when set) is snapshotted into an [`OrderItem`]. Rows whose
    /// product has vanished from the catalog are skipped. The order total is
    /// the checkout figure the client confirmed (cart plus shipping), not
    /// recomputed here.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn create_order(
        &self,
        user_id: UserId,
        new: NewOrder,
        cart_items: &[CartItem],
    ) -> Result<Order, StoreError> {
        let mut tables = self.write()?;

        let id = take_id(&mut tables.next_order_id);
        let order = Order {
            id: OrderId::new(id),
            user_id,
            status: OrderStatus::Pending,
            total: new.total,
            shipping_address: new.shipping_address,
            payment_method: new.payment_method,
            created_at: Utc::now(),
        };
        tables.orders.insert(id, order.clone());

        for cart_item in cart_items {
            let Some(unit_price) = tables
                .products
                .get(&cart_item.product_id.as_i32())
                .map(Product::effective_price)
            else {
                tracing::warn!(
                    product_id = %cart_item.product_id,
                    order_id = %order.id,
                    "skipping cart row for vanished product"
                );
                continue;
            };

            let item_id = take_id(&mut tables.next_order_item_id);
            tables.order_items.insert(
                item_id,
                OrderItem {
                    id: OrderItemId::new(item_id),
                    order_id: order.id,
                    product_id: cart_item.product_id,
                    quantity: cart_item.quantity,
                    price: unit_price,
                },
            );
        }

        Ok(order)
    }

    /// Set an order's status. Returns `None` when the ID is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        let mut tables = self.write()?;

        match tables.orders.get_mut(&id.as_i32()) {
            Some(order) => {
                order.status = status;
                Ok(Some(order.clone()))
            }
            None => Ok(None),
        }
    }

    /// Line items of one order, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, StoreError> {
        Ok(self
            .read()?
            .order_items
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect())
    }
}
