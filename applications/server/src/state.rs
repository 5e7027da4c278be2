/// Shared application state
use shelf_core::storage::StorageContext;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageContext>,
}

impl AppState {
    pub fn new(storage: Arc<dyn StorageContext>) -> Self {
        Self { storage }
    }
}
