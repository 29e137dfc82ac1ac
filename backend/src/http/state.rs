//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::ReadingRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Reading store shared by every request
    pub repository: Arc<dyn ReadingRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ReadingRepository>) -> Self {
        Self { repository }
    }
}
