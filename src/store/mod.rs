//! Persistence seam between the domain modules and the document database.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use gametracker_db::ObjectId;
use gametracker_http::error::AppError;

use crate::modules::games::models::{Game, NewGame};
use crate::modules::reviews::models::{NewReview, Review};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

pub const GAMES_COLLECTION: &str = "games";
pub const REVIEWS_COLLECTION: &str = "reviews";

/// Failures raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("{collection} store lock poisoned")]
    Poisoned { collection: &'static str },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.into())
    }
}

/// CRUD access to the `games` collection.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// All games in natural (insertion) order.
    async fn list_games(&self) -> Result<Vec<Game>, StoreError>;

    async fn find_game(&self, id: ObjectId) -> Result<Option<Game>, StoreError>;

    /// Games matching any of `ids`; unknown ids are skipped.
    async fn find_games(&self, ids: &[ObjectId]) -> Result<Vec<Game>, StoreError>;

    /// Assign an id and timestamps, then persist.
    async fn insert_game(&self, game: NewGame) -> Result<Game, StoreError>;

    /// Overwrite an existing game, refreshing `updated_at`.
    /// Returns `None` when the game no longer exists.
    async fn replace_game(&self, game: Game) -> Result<Option<Game>, StoreError>;

    /// Returns whether a game was removed.
    async fn delete_game(&self, id: ObjectId) -> Result<bool, StoreError>;
}

/// CRUD access to the `reviews` collection.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError>;

    async fn find_review(&self, id: ObjectId) -> Result<Option<Review>, StoreError>;

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError>;

    async fn replace_review(&self, review: Review) -> Result<Option<Review>, StoreError>;

    async fn delete_review(&self, id: ObjectId) -> Result<bool, StoreError>;
}

/// Everything the API needs from persistence.
pub trait Store: GameStore + ReviewStore {}

impl<T> Store for T where T: GameStore + ReviewStore {}
