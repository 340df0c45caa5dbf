//! Admin dashboard aggregates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use saree_core::{OrderId, OrderStatus, ProductId};

/// Dashboard stats returned by `GET /api/admin/stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Sum of totals across non-cancelled orders.
    pub total_revenue: Decimal,
    pub total_orders: u64,
    /// Registered non-admin accounts.
    pub total_customers: u64,
    pub total_products: u64,
    /// The five most recent orders, newest first.
    pub recent_orders: Vec<RecentOrder>,
    /// The five best-selling products by units sold.
    pub top_products: Vec<TopProduct>,
}

/// A row in the dashboard's recent-orders panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    pub total: Decimal,
    pub status: OrderStatus,
}

/// A row in the dashboard's top-products panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub id: ProductId,
    pub name: String,
    /// Units sold across all orders.
    pub sold: u64,
    /// Revenue attributed to this product (snapshot price times quantity).
    pub revenue: Decimal,
}
