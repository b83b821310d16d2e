pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use gametracker_kernel::Module;

use crate::state::AppState;

/// Read-only aggregate report over games and reviews
pub struct StatsModule {
    state: AppState,
}

impl StatsModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for StatsModule {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }
}

/// Create a new instance of the stats module
pub fn create_module(state: AppState) -> Arc<dyn Module> {
    Arc::new(StatsModule::new(state))
}
