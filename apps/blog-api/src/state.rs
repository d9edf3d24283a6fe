//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;

/// Shared application state. Holds no post data, only the store handle.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}
