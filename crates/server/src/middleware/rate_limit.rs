//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Only the authentication endpoints are limited; catalog reads are cheap
//! map lookups and left alone.

use std::sync::Arc;

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor};

/// Rate limiter layer type for Axum.
///
/// `SmartIpKeyExtractor` resolves the real client IP from the usual proxy
/// headers before falling back to the peer address.
pub type RateLimiterLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create the rate limiter for auth endpoints: ~10 requests per minute per IP.
///
/// Configuration: 1 token every 6 seconds, burst of 5. Slows brute force on
/// login and registration without bothering real users.
///
/// # Panics
///
/// Will not panic: `per_second(6)` and `burst_size(5)` are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}
