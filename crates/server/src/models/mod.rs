//! Domain models for the storefront backend.
//!
//! All wire-facing structs serialize with camelCase field names, the shape
//! the browser client consumes. Prices are `rust_decimal::Decimal` and
//! serialize as strings.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod review;
pub mod session;
pub mod stats;
pub mod user;

pub use cart::{CartItem, NewCartItem};
pub use catalog::{Category, NewCategory, NewProduct, Product, ProductFilter};
pub use order::{NewOrder, Order, OrderItem};
pub use review::{NewReview, NewTestimonial, Review, Testimonial};
pub use stats::{AdminStats, RecentOrder, TopProduct};
pub use user::{NewUser, User};
