pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::Router;

use gametracker_kernel::{InitCtx, Module};

use crate::state::AppState;

/// Tracked games: CRUD plus single-field updates
pub struct GamesModule {
    state: AppState,
}

impl GamesModule {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl Module for GamesModule {
    fn name(&self) -> &'static str {
        "games"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = %ctx.settings.environment,
            "games module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.state.clone())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let games = self
            .state
            .store()
            .list_games()
            .await
            .context("games collection is not readable")?;
        tracing::info!(module = self.name(), games = games.len(), "games module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "games module stopped");
        Ok(())
    }
}

/// Create a new instance of the games module
pub fn create_module(state: AppState) -> Arc<dyn Module> {
    Arc::new(GamesModule::new(state))
}
