//! HTTP route handlers for the storefront backend.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check
//!
//! # Auth (session cookie; rate limited)
//! POST /api/auth/register          - Create an account
//! POST /api/auth/login             - Login
//! POST /api/auth/logout            - Logout
//! GET  /api/auth/user              - Current user
//!
//! # Catalog (public reads, admin writes)
//! GET    /api/categories           - List categories
//! GET    /api/categories/{id}      - Category detail
//! POST   /api/categories           - Create category (admin)
//! PUT    /api/categories/{id}      - Replace category (admin)
//! DELETE /api/categories/{id}      - Delete category (admin)
//! GET    /api/products             - List products (filterable)
//! GET    /api/products/{id}        - Product detail
//! POST   /api/products             - Create product (admin)
//! PUT    /api/products/{id}        - Replace product (admin)
//! DELETE /api/products/{id}        - Delete product (admin)
//!
//! # Reviews
//! GET  /api/products/{id}/reviews  - List product reviews
//! POST /api/products/{id}/reviews  - Post a review (auth)
//!
//! # Cart (auth)
//! GET    /api/cart                 - Cart contents
//! POST   /api/cart                 - Add to cart
//! PUT    /api/cart/{id}            - Set row quantity
//! DELETE /api/cart/{id}            - Remove row
//!
//! # Orders (auth)
//! GET  /api/orders                 - Own orders (admin + ?all=true: every order)
//! GET  /api/orders/{id}            - Order detail (owner or admin)
//! POST /api/orders                 - Place order from cart
//! PUT  /api/orders/{id}/status     - Set status (admin)
//!
//! # Testimonials
//! GET  /api/testimonials           - List testimonials
//! POST /api/testimonials           - Create testimonial (admin)
//!
//! # Admin
//! GET  /api/admin/stats            - Dashboard aggregates
//! GET  /api/admin/users            - All users (passwords stripped)
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod testimonials;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router (rate limited).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
        .layer(auth_rate_limiter())
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route(
            "/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::remove),
        )
}

/// Create the product routes router, with nested reviews.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
        .route(
            "/{id}/reviews",
            get(reviews::index).post(reviews::create),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::index).post(cart::add))
        .route("/{id}", put(cart::update).delete(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", put(orders::update_status))
}

/// Create the testimonial routes router.
pub fn testimonial_routes() -> Router<AppState> {
    Router::new().route("/", get(testimonials::index).post(testimonials::create))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/users", get(admin::users))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/categories", category_routes())
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/testimonials", testimonial_routes())
        .nest("/api/admin", admin_routes())
}
