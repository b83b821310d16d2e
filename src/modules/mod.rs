pub mod games;
pub mod reviews;
pub mod stats;

use gametracker_kernel::ModuleRegistry;

use crate::state::AppState;

/// Register all API modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, state: &AppState) {
    registry.register(games::create_module(state.clone()));
    registry.register(reviews::create_module(state.clone()));
    registry.register(stats::create_module(state.clone()));
}
