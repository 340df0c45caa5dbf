//! Business-logic services that sit between routes and the store.

pub mod auth;
