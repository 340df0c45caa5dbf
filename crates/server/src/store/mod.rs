//! In-memory data store.
//!
//! The storefront keeps every table in process memory: plain maps keyed by
//! auto-incrementing IDs behind a single `RwLock`. Nothing survives a
//! restart, there are no transactions and no referential-integrity
//! enforcement; a seed catalog is loaded at startup (see [`seed`]).
//!
//! # Tables
//!
//! - `users` - customer and admin accounts
//! - `categories`, `products` - the catalog
//! - `cart_items` - per-user shopping carts
//! - `orders`, `order_items` - placed orders with price snapshots
//! - `reviews` - product reviews
//! - `testimonials` - curated homepage quotes
//!
//! Writers take the lock for the duration of one operation, so every
//! operation observes and produces a consistent snapshot.

mod cart;
mod catalog;
mod orders;
mod reviews;
pub mod seed;
mod stats;
mod users;

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::models::{CartItem, Category, Order, OrderItem, Product, Review, Testimonial, User};

/// Errors surfaced by store operations.
///
/// "Row not found" is not an error here; lookups return `Option` and the
/// route layer decides how to answer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the table lock.
    #[error("store lock poisoned")]
    Poisoned,

    /// A uniqueness rule was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// All tables plus their ID counters.
///
/// IDs start at 1 and are never reused within a process lifetime, even
/// after deletes.
struct Tables {
    users: BTreeMap<i32, User>,
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    cart_items: BTreeMap<i32, CartItem>,
    orders: BTreeMap<i32, Order>,
    order_items: BTreeMap<i32, OrderItem>,
    reviews: BTreeMap<i32, Review>,
    testimonials: BTreeMap<i32, Testimonial>,
    next_user_id: i32,
    next_category_id: i32,
    next_product_id: i32,
    next_cart_item_id: i32,
    next_order_id: i32,
    next_order_item_id: i32,
    next_review_id: i32,
    next_testimonial_id: i32,
}

impl Tables {
    const fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            categories: BTreeMap::new(),
            products: BTreeMap::new(),
            cart_items: BTreeMap::new(),
            orders: BTreeMap::new(),
            order_items: BTreeMap::new(),
            reviews: BTreeMap::new(),
            testimonials: BTreeMap::new(),
            next_user_id: 1,
            next_category_id: 1,
            next_product_id: 1,
            next_cart_item_id: 1,
            next_order_id: 1,
            next_order_item_id: 1,
            next_review_id: 1,
            next_testimonial_id: 1,
        }
    }
}

/// Claim the next ID from a counter.
fn take_id(counter: &mut i32) -> i32 {
    let id = *counter;
    *counter += 1;
    id
}

/// The in-memory store shared across all request handlers.
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }

    /// Readiness probe: confirms the table lock is healthy.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if a writer panicked while holding
    /// the lock.
    pub fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
