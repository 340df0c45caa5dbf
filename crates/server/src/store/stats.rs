//! Admin dashboard aggregation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use saree_core::OrderStatus;

use super::{Store, StoreError};
use crate::models::{AdminStats, RecentOrder, TopProduct};

/// Rows shown in the recent-orders and top-products panels.
const DASHBOARD_ROWS: usize = 5;

impl Store {
    /// Compute the dashboard aggregates in one pass over the tables.
    ///
    /// Revenue sums the totals of non-cancelled orders. Top products rank by
    /// units sold, with revenue from the order items' snapshot prices;
    /// products since removed from the catalog are left out.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the table lock is poisoned.
    pub fn admin_stats(&self) -> Result<AdminStats, StoreError> {
        let tables = self.read()?;

        let total_revenue = tables
            .orders
            .values()
            .filter(|order| order.status != OrderStatus::Cancelled)
            .map(|order| order.total)
            .sum();

        let total_customers = tables.users.values().filter(|u| !u.is_admin).count() as u64;

        let mut recent: Vec<&crate::models::Order> = tables.orders.values().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let recent_orders = recent
            .into_iter()
            .take(DASHBOARD_ROWS)
            .map(|order| RecentOrder {
                id: order.id,
                date: order.created_at,
                total: order.total,
                status: order.status,
            })
            .collect();

        // Units and revenue per product across all order items.
        let mut sales: BTreeMap<i32, (u64, Decimal)> = BTreeMap::new();
        for item in tables.order_items.values() {
            let entry = sales
                .entry(item.product_id.as_i32())
                .or_insert((0, Decimal::ZERO));
            entry.0 += u64::from(item.quantity);
            entry.1 += item.price * Decimal::from(item.quantity);
        }
        let mut top: Vec<TopProduct> = sales
            .into_iter()
            .filter_map(|(product_id, (sold, revenue))| {
                tables.products.get(&product_id).map(|product| TopProduct {
                    id: product.id,
                    name: product.name.clone(),
                    sold,
                    revenue,
                })
            })
            .collect();
        top.sort_by(|a, b| b.sold.cmp(&a.sold).then(a.id.cmp(&b.id)));
        top.truncate(DASHBOARD_ROWS);

        Ok(AdminStats {
            total_revenue,
            total_orders: tables.orders.len() as u64,
            total_customers,
            total_products: tables.products.len() as u64,
            recent_orders,
            top_products: top,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use saree_core::{PaymentMethod, UserId};

    use super::*;
    use crate::models::{NewCartItem, NewCategory, NewOrder, NewProduct, NewUser};

    fn checkout(total: i64) -> NewOrder {
        NewOrder {
            total: Decimal::new(total, 2),
            shipping_address: "addr".to_owned(),
            payment_method: PaymentMethod::Card,
        }
    }

    fn seed_user(store: &Store, name: &str, is_admin: bool) -> UserId {
        store
            .create_user(NewUser {
                username: saree_core::Username::parse(name).unwrap(),
                password_hash: "hash".to_owned(),
                email: saree_core::Email::parse(&format!("{name}@example.com")).unwrap(),
                full_name: name.to_owned(),
                is_admin,
            })
            .unwrap()
            .id
    }

    fn seed_product(store: &Store, name: &str, slug: &str, price: i64) -> saree_core::ProductId {
        let category_id = store
            .create_category(NewCategory {
                name: name.to_owned(),
                slug: slug.to_owned(),
                description: None,
                image_url: None,
            })
            .unwrap()
            .id;
        store
            .create_product(NewProduct {
                name: name.to_owned(),
                description: "d".to_owned(),
                price: Decimal::new(price, 2),
                discount_price: None,
                image_url: "/i.jpg".to_owned(),
                images: Vec::new(),
                category_id,
                stock: 10,
                featured: false,
                is_new_arrival: false,
                is_best_seller: false,
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_empty_store_stats() {
        let store = Store::new();
        let stats = store.admin_stats().unwrap();
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.total_orders, 0);
        assert!(stats.recent_orders.is_empty());
        assert!(stats.top_products.is_empty());
    }

    #[test]
    fn test_cancelled_orders_excluded_from_revenue() {
        let store = Store::new();
        let user = seed_user(&store, "priya", false);

        store.create_order(user, checkout(10000), &[]).unwrap();
        let cancelled = store.create_order(user, checkout(99999), &[]).unwrap();
        store
            .update_order_status(cancelled.id, saree_core::OrderStatus::Cancelled)
            .unwrap();

        let stats = store.admin_stats().unwrap();
        assert_eq!(stats.total_revenue, Decimal::new(10000, 2));
        // Cancelled orders still count toward the order total.
        assert_eq!(stats.total_orders, 2);
    }

    #[test]
    fn test_admins_not_counted_as_customers() {
        let store = Store::new();
        seed_user(&store, "priya", false);
        seed_user(&store, "admin", true);

        let stats = store.admin_stats().unwrap();
        assert_eq!(stats.total_customers, 1);
    }

    #[test]
    fn test_top_products_ranked_by_units() {
        let store = Store::new();
        let user = seed_user(&store, "priya", false);
        let banarasi = seed_product(&store, "Banarasi", "banarasi", 100000);
        let kanjivaram = seed_product(&store, "Kanjivaram", "kanjivaram", 200000);

        store
            .add_to_cart(
                user,
                NewCartItem {
                    product_id: banarasi,
                    quantity: 3,
                },
            )
            .unwrap();
        store
            .add_to_cart(
                user,
                NewCartItem {
                    product_id: kanjivaram,
                    quantity: 1,
                },
            )
            .unwrap();
        let cart = store.cart_items(user).unwrap();
        store.create_order(user, checkout(500000), &cart).unwrap();

        let stats = store.admin_stats().unwrap();
        assert_eq!(stats.top_products.len(), 2);
        let first = stats.top_products.first().unwrap();
        assert_eq!(first.name, "Banarasi");
        assert_eq!(first.sold, 3);
        assert_eq!(first.revenue, Decimal::new(300000, 2));
    }
}
