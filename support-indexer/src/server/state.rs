// App state for the Axum server
use std::sync::Arc;

use crate::readiness::ReadinessGate;
use support_indexer_repository::SearchIndexService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SearchIndexService>,
    pub readiness: ReadinessGate,
}

impl AppState {
    pub fn new(service: Arc<SearchIndexService>, readiness: ReadinessGate) -> Self {
        Self { service, readiness }
    }
}
