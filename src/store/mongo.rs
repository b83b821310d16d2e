//! MongoDB-backed store. Documents keep the camelCase layout with `_id`,
//! `createdAt` and `updatedAt`, so existing collections can be reused.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

use gametracker_db::ObjectId;

use super::{GameStore, ReviewStore, StoreError, GAMES_COLLECTION, REVIEWS_COLLECTION};
use crate::modules::games::models::{Game, NewGame, DEFAULT_COVER_IMAGE_URL};
use crate::modules::reviews::models::{NewReview, Review, DEFAULT_AUTHOR};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameRecord {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    release_date: Option<BsonDateTime>,
    #[serde(default)]
    cover_image_url: Option<String>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    hours_played: f64,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    created_at: Option<BsonDateTime>,
    #[serde(default)]
    updated_at: Option<BsonDateTime>,
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id,
            title: game.title.clone(),
            genre: game.genre.clone(),
            platform: game.platform.clone(),
            developer: game.developer.clone(),
            publisher: game.publisher.clone(),
            description: game.description.clone(),
            release_date: game.release_date.map(to_bson),
            cover_image_url: Some(game.cover_image_url.clone()),
            completed: game.completed,
            hours_played: game.hours_played,
            rating: game.rating,
            created_at: Some(to_bson(game.created_at)),
            updated_at: Some(to_bson(game.updated_at)),
        }
    }
}

impl From<GameRecord> for Game {
    fn from(record: GameRecord) -> Self {
        let created_at = record.created_at.unwrap_or_else(|| record.id.timestamp());
        Self {
            id: record.id,
            title: record.title,
            genre: record.genre,
            platform: record.platform,
            developer: record.developer,
            publisher: record.publisher,
            description: record.description,
            release_date: record.release_date.map(from_bson),
            cover_image_url: record
                .cover_image_url
                .unwrap_or_else(|| DEFAULT_COVER_IMAGE_URL.to_string()),
            completed: record.completed,
            hours_played: record.hours_played,
            rating: record.rating,
            created_at: from_bson(created_at),
            updated_at: from_bson(record.updated_at.unwrap_or(created_at)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRecord {
    #[serde(rename = "_id")]
    id: ObjectId,
    game: ObjectId,
    #[serde(default = "default_author")]
    author: String,
    rating: f64,
    comment: String,
    #[serde(default)]
    created_at: Option<BsonDateTime>,
    #[serde(default)]
    updated_at: Option<BsonDateTime>,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

impl From<&Review> for ReviewRecord {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            game: review.game,
            author: review.author.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: Some(to_bson(review.created_at)),
            updated_at: Some(to_bson(review.updated_at)),
        }
    }
}

impl From<ReviewRecord> for Review {
    fn from(record: ReviewRecord) -> Self {
        let created_at = record.created_at.unwrap_or_else(|| record.id.timestamp());
        Self {
            id: record.id,
            game: record.game,
            author: record.author,
            rating: record.rating,
            comment: record.comment,
            created_at: from_bson(created_at),
            updated_at: from_bson(record.updated_at.unwrap_or(created_at)),
        }
    }
}

fn to_bson(timestamp: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(timestamp.timestamp_millis())
}

fn from_bson(timestamp: BsonDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(timestamp.timestamp_millis()).unwrap_or_default()
}

/// Current time at the millisecond precision MongoDB stores.
fn now() -> DateTime<Utc> {
    from_bson(BsonDateTime::now())
}

/// Store backed by the `games` and `reviews` collections of one database.
#[derive(Clone)]
pub struct MongoStore {
    games: Collection<GameRecord>,
    reviews: Collection<ReviewRecord>,
}

impl MongoStore {
    pub fn new(database: &Database) -> Self {
        Self {
            games: database.collection(GAMES_COLLECTION),
            reviews: database.collection(REVIEWS_COLLECTION),
        }
    }
}

#[async_trait]
impl GameStore for MongoStore {
    async fn list_games(&self) -> Result<Vec<Game>, StoreError> {
        let records: Vec<GameRecord> = self.games.find(doc! {}).await?.try_collect().await?;
        Ok(records.into_iter().map(Game::from).collect())
    }

    async fn find_game(&self, id: ObjectId) -> Result<Option<Game>, StoreError> {
        let record = self.games.find_one(doc! { "_id": id }).await?;
        Ok(record.map(Game::from))
    }

    async fn find_games(&self, ids: &[ObjectId]) -> Result<Vec<Game>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<GameRecord> = self
            .games
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(records.into_iter().map(Game::from).collect())
    }

    async fn insert_game(&self, game: NewGame) -> Result<Game, StoreError> {
        let game = game.into_game(ObjectId::new(), now());
        self.games.insert_one(GameRecord::from(&game)).await?;
        tracing::debug!(game_id = %game.id, "game inserted");
        Ok(game)
    }

    async fn replace_game(&self, mut game: Game) -> Result<Option<Game>, StoreError> {
        game.updated_at = now();
        let result = self
            .games
            .replace_one(doc! { "_id": game.id }, GameRecord::from(&game))
            .await?;
        Ok((result.matched_count > 0).then_some(game))
    }

    async fn delete_game(&self, id: ObjectId) -> Result<bool, StoreError> {
        let result = self.games.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl ReviewStore for MongoStore {
    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        let records: Vec<ReviewRecord> =
            self.reviews.find(doc! {}).await?.try_collect().await?;
        Ok(records.into_iter().map(Review::from).collect())
    }

    async fn find_review(&self, id: ObjectId) -> Result<Option<Review>, StoreError> {
        let record = self.reviews.find_one(doc! { "_id": id }).await?;
        Ok(record.map(Review::from))
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let review = review.into_review(ObjectId::new(), now());
        self.reviews.insert_one(ReviewRecord::from(&review)).await?;
        tracing::debug!(review_id = %review.id, game_id = %review.game, "review inserted");
        Ok(review)
    }

    async fn replace_review(&self, mut review: Review) -> Result<Option<Review>, StoreError> {
        review.updated_at = now();
        let result = self
            .reviews
            .replace_one(doc! { "_id": review.id }, ReviewRecord::from(&review))
            .await?;
        Ok((result.matched_count > 0).then_some(review))
    }

    async fn delete_review(&self, id: ObjectId) -> Result<bool, StoreError> {
        let result = self.reviews.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
