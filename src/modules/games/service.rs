//! Game operations shared by the HTTP handlers.

use gametracker_http::error::AppError;

use super::models::{CreateGame, Game, SetCompleted, SetHoursPlayed, SetRating, UpdateGame};
use crate::store::Store;
use crate::utils::parse_id;

pub async fn list_games(store: &dyn Store) -> Result<Vec<Game>, AppError> {
    Ok(store.list_games().await?)
}

pub async fn get_game(store: &dyn Store, raw_id: &str) -> Result<Game, AppError> {
    let id = parse_id(raw_id, "game")?;
    store
        .find_game(id)
        .await?
        .ok_or_else(|| AppError::not_found("Game not found"))
}

pub async fn create_game(store: &dyn Store, input: CreateGame) -> Result<Game, AppError> {
    let new_game = input.validate()?;
    let game = store.insert_game(new_game).await?;
    tracing::info!(game_id = %game.id, title = %game.title, "game created");
    Ok(game)
}

pub async fn update_game(
    store: &dyn Store,
    raw_id: &str,
    input: UpdateGame,
) -> Result<Game, AppError> {
    let id = parse_id(raw_id, "game")?;
    input.validate()?;

    let mut game = store
        .find_game(id)
        .await?
        .ok_or_else(|| AppError::not_found("Game not found"))?;
    input.apply_to(&mut game);

    let game = store
        .replace_game(game)
        .await?
        .ok_or_else(|| AppError::not_found("Game not found"))?;
    tracing::info!(game_id = %game.id, "game updated");
    Ok(game)
}

pub async fn set_completed(
    store: &dyn Store,
    raw_id: &str,
    input: SetCompleted,
) -> Result<Game, AppError> {
    update_game(store, raw_id, input.into()).await
}

pub async fn set_rating(
    store: &dyn Store,
    raw_id: &str,
    input: SetRating,
) -> Result<Game, AppError> {
    update_game(store, raw_id, input.into()).await
}

pub async fn set_hours_played(
    store: &dyn Store,
    raw_id: &str,
    input: SetHoursPlayed,
) -> Result<Game, AppError> {
    update_game(store, raw_id, input.into()).await
}

/// Remove a game. Its reviews are left in place and will report an unknown game.
pub async fn delete_game(store: &dyn Store, raw_id: &str) -> Result<(), AppError> {
    let id = parse_id(raw_id, "game")?;
    if !store.delete_game(id).await? {
        return Err(AppError::not_found("Game not found"));
    }
    tracing::info!(game_id = %id, "game deleted");
    Ok(())
}
