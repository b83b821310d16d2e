use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::{json, Value};

use gametracker_http::{error::AppError, extract::AppJson};

use super::models::{CreateGame, Game, SetCompleted, SetHoursPlayed, SetRating, UpdateGame};
use super::service;
use crate::state::AppState;

/// Routes mounted under `/api/games`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_games).post(create_game))
        .route("/{id}", get(get_game).put(update_game).delete(delete_game))
        .route("/{id}/completed", patch(set_completed))
        .route("/{id}/rating", patch(set_rating))
        .route("/{id}/hoursPlayed", patch(set_hours_played))
        .with_state(state)
}

async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>, AppError> {
    service::list_games(state.store()).await.map(Json)
}

async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, AppError> {
    service::get_game(state.store(), &id).await.map(Json)
}

async fn create_game(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGame>,
) -> Result<(StatusCode, Json<Game>), AppError> {
    let game = service::create_game(state.store(), input).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateGame>,
) -> Result<Json<Game>, AppError> {
    service::update_game(state.store(), &id, input)
        .await
        .map(Json)
}

async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    service::delete_game(state.store(), &id).await?;
    Ok(Json(json!({ "message": "Game deleted" })))
}

async fn set_completed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<SetCompleted>,
) -> Result<Json<Game>, AppError> {
    service::set_completed(state.store(), &id, input)
        .await
        .map(Json)
}

async fn set_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<SetRating>,
) -> Result<Json<Game>, AppError> {
    service::set_rating(state.store(), &id, input)
        .await
        .map(Json)
}

async fn set_hours_played(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<SetHoursPlayed>,
) -> Result<Json<Game>, AppError> {
    service::set_hours_played(state.store(), &id, input)
        .await
        .map(Json)
}
