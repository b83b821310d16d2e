//! GameTracker application library
//!
//! Domain modules for games, reviews and statistics, the store they persist
//! through, and the bootstrap that wires them into the HTTP server.

pub mod modules;
pub mod state;
pub mod store;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;

use gametracker_kernel::{
    settings::{Settings, StoreBackend},
    InitCtx, ModuleRegistry,
};

pub use state::AppState;
use store::{MemoryStore, MongoStore};

/// Registry holding every API module, all sharing `state`.
pub fn registry(state: &AppState) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, state);
    registry
}

/// Complete HTTP router for `state`.
pub fn router(state: &AppState, settings: &Settings) -> Router {
    gametracker_http::build_router(&registry(state), settings)
}

/// Open the configured store, create indexes, and serve until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let ctx = InitCtx {
        settings: &settings,
    };

    let (state, database) = match settings.database.backend {
        StoreBackend::Mongo => {
            let database = gametracker_db::connect(&settings.database)
                .await
                .context("failed to connect to MongoDB")?;
            let state = AppState::new(Arc::new(MongoStore::new(&database)));
            (state, Some(database))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on shutdown");
            (AppState::new(Arc::new(MemoryStore::new())), None)
        }
    };

    let registry = registry(&state);
    registry.init_modules(&ctx).await?;

    if let Some(database) = &database {
        gametracker_db::ensure_indexes(database, &registry.collect_indexes()).await?;
    }

    registry.start_modules(&ctx).await?;
    gametracker_http::start_server(&registry, &settings).await?;
    registry.stop_modules().await?;

    tracing::info!("gametracker shut down cleanly");
    Ok(())
}
