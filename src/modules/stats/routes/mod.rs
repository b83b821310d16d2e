use axum::{extract::State, routing::get, Json, Router};

use gametracker_http::error::AppError;

use super::models::Stats;
use super::service;
use crate::state::AppState;

/// Routes mounted under `/api/stats`.
pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(get_stats)).with_state(state)
}

async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>, AppError> {
    service::compute(state.store()).await.map(Json)
}
