//! Shared application state for all routes. The store is opened once at startup and injected.

use crate::store::CampgroundStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CampgroundStore>,
}

impl AppState {
    pub fn new<S: CampgroundStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
