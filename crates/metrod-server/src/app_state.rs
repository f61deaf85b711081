//! Shared application state for the metrod server.

use std::sync::Arc;

use metrod_core::MetricStore;

/// Cheaply clonable handle passed to every request handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MetricStore>,
}

impl AppState {
    pub fn new(store: Arc<MetricStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MetricStore {
        &self.store
    }
}
