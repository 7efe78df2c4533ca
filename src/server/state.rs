use crate::place::GeoFinder;
use std::sync::Arc;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<GeoFinder>,
}

impl AppState {
    pub fn new(finder: GeoFinder) -> Self {
        Self {
            finder: Arc::new(finder),
        }
    }
}
