//! Review operations, including the game-title enrichment of every response.

use std::collections::HashMap;

use gametracker_db::ObjectId;
use gametracker_http::error::AppError;

use super::models::{CreateReview, Review, ReviewView, UpdateReview};
use crate::store::Store;
use crate::utils::parse_id;

pub async fn list_reviews(store: &dyn Store) -> Result<Vec<ReviewView>, AppError> {
    let reviews = store.list_reviews().await?;

    let mut game_ids: Vec<ObjectId> = reviews.iter().map(|review| review.game).collect();
    game_ids.sort();
    game_ids.dedup();
    let titles = game_titles(store, &game_ids).await;

    Ok(reviews
        .into_iter()
        .map(|review| {
            let title = titles.get(&review.game).cloned();
            ReviewView::new(review, title)
        })
        .collect())
}

pub async fn get_review(store: &dyn Store, raw_id: &str) -> Result<ReviewView, AppError> {
    let id = parse_id(raw_id, "review")?;
    let review = store
        .find_review(id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;
    Ok(enrich(store, review).await)
}

pub async fn create_review(store: &dyn Store, input: CreateReview) -> Result<ReviewView, AppError> {
    let new_review = input.validate()?;

    let game = store
        .find_game(new_review.game)
        .await?
        .ok_or_else(|| AppError::not_found("Game not found for this review"))?;

    let review = store.insert_review(new_review).await?;
    tracing::info!(review_id = %review.id, game_id = %game.id, "review created");
    Ok(ReviewView::new(review, Some(game.title)))
}

pub async fn update_review(
    store: &dyn Store,
    raw_id: &str,
    input: UpdateReview,
) -> Result<ReviewView, AppError> {
    let id = parse_id(raw_id, "review")?;
    let new_game = input.validate()?;

    let mut review = store
        .find_review(id)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;

    if let Some(game_id) = new_game {
        if store.find_game(game_id).await?.is_none() {
            return Err(AppError::not_found("Game not found for this review"));
        }
    }
    input.apply_to(&mut review, new_game);

    let review = store
        .replace_review(review)
        .await?
        .ok_or_else(|| AppError::not_found("Review not found"))?;
    tracing::info!(review_id = %review.id, "review updated");
    Ok(enrich(store, review).await)
}

pub async fn delete_review(store: &dyn Store, raw_id: &str) -> Result<(), AppError> {
    let id = parse_id(raw_id, "review")?;
    if store.find_review(id).await?.is_none() || !store.delete_review(id).await? {
        return Err(AppError::not_found("Review not found"));
    }
    tracing::info!(review_id = %id, "review deleted");
    Ok(())
}

async fn enrich(store: &dyn Store, review: Review) -> ReviewView {
    let title = game_titles(store, &[review.game])
        .await
        .remove(&review.game);
    ReviewView::new(review, title)
}

/// Resolve game titles. Lookup failures degrade to the unknown-game sentinel
/// instead of failing the read.
async fn game_titles(store: &dyn Store, ids: &[ObjectId]) -> HashMap<ObjectId, String> {
    match store.find_games(ids).await {
        Ok(games) => games
            .into_iter()
            .map(|game| (game.id, game.title))
            .collect(),
        Err(err) => {
            tracing::warn!(error = %err, games = ids.len(), "game title lookup failed");
            HashMap::new()
        }
    }
}
