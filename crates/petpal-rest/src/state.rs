//! Application state for Axum handlers.

use petpal_service::ForumService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub forum_service: Arc<dyn ForumService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(forum_service: Arc<dyn ForumService>) -> Self {
        Self { forum_service }
    }
}
