//! Application state for the HTTP server.

use crate::services::DashboardService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Model and history log behind one service object
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(dashboard: DashboardService) -> Self {
        Self { dashboard }
    }
}
