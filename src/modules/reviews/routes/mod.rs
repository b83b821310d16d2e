use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use gametracker_http::{error::AppError, extract::AppJson};

use super::models::{CreateReview, ReviewView, UpdateReview};
use super::service;
use crate::state::AppState;

/// Routes mounted under `/api/reviews`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .with_state(state)
}

async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<ReviewView>>, AppError> {
    service::list_reviews(state.store()).await.map(Json)
}

async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReviewView>, AppError> {
    service::get_review(state.store(), &id).await.map(Json)
}

async fn create_review(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateReview>,
) -> Result<(StatusCode, Json<ReviewView>), AppError> {
    let review = service::create_review(state.store(), input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateReview>,
) -> Result<Json<ReviewView>, AppError> {
    service::update_review(state.store(), &id, input)
        .await
        .map(Json)
}

async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    service::delete_review(state.store(), &id).await?;
    Ok(Json(json!({ "message": "Review deleted" })))
}
