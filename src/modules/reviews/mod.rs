pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use gametracker_kernel::{IndexSpec, InitCtx, Module};

use crate::state::AppState;
use crate::store::REVIEWS_COLLECTION;

/// User reviews, each tied to one game
pub struct ReviewsModule {
    state: AppState,
}

impl ReviewsModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for ReviewsModule {
    fn name(&self) -> &'static str {
        "reviews"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = %ctx.settings.environment,
            "reviews module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    fn indexes(&self) -> Vec<IndexSpec> {
        vec![IndexSpec::ascending(REVIEWS_COLLECTION, "game")]
    }
}

/// Create a new instance of the reviews module
pub fn create_module(state: AppState) -> Arc<dyn Module> {
    Arc::new(ReviewsModule::new(state))
}
