//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the in-memory
/// store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Store,
}

impl AppState {
    /// Create a new application state around an already-seeded store.
    #[must_use]
    pub fn new(config: ServerConfig, store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the in-memory store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }
}
