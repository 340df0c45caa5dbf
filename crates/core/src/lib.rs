//! Saree Grace Core - Shared types library.
//!
//! This crate provides common types used across all Saree Grace components:
//! - `server` - REST API backend for the storefront and admin panel
//! - `cli` - Command-line tools for seed catalog management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, usernames, and
//!   the order status / payment method enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
