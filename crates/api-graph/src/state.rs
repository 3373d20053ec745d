use core_executor::QueryCoordinator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<QueryCoordinator>,
}

impl AppState {
    #[must_use]
    pub const fn new(coordinator: Arc<QueryCoordinator>) -> Self {
        Self { coordinator }
    }
}
