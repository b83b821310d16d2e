//! In-memory store used for local development and tests.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use gametracker_db::ObjectId;

use super::{GameStore, ReviewStore, StoreError, GAMES_COLLECTION, REVIEWS_COLLECTION};
use crate::modules::games::models::{Game, NewGame};
use crate::modules::reviews::models::{NewReview, Review};

/// Collections keyed by ObjectId. ObjectIds grow monotonically within a
/// process, so map order doubles as insertion order.
#[derive(Default)]
pub struct MemoryStore {
    games: RwLock<BTreeMap<ObjectId, Game>>,
    reviews: RwLock<BTreeMap<ObjectId, Review>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn games(&self) -> Result<RwLockReadGuard<'_, BTreeMap<ObjectId, Game>>, StoreError> {
        self.games.read().map_err(|_| StoreError::Poisoned {
            collection: GAMES_COLLECTION,
        })
    }

    fn games_mut(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<ObjectId, Game>>, StoreError> {
        self.games.write().map_err(|_| StoreError::Poisoned {
            collection: GAMES_COLLECTION,
        })
    }

    fn reviews(&self) -> Result<RwLockReadGuard<'_, BTreeMap<ObjectId, Review>>, StoreError> {
        self.reviews.read().map_err(|_| StoreError::Poisoned {
            collection: REVIEWS_COLLECTION,
        })
    }

    fn reviews_mut(
        &self,
    ) -> Result<RwLockWriteGuard<'_, BTreeMap<ObjectId, Review>>, StoreError> {
        self.reviews.write().map_err(|_| StoreError::Poisoned {
            collection: REVIEWS_COLLECTION,
        })
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn list_games(&self) -> Result<Vec<Game>, StoreError> {
        Ok(self.games()?.values().cloned().collect())
    }

    async fn find_game(&self, id: ObjectId) -> Result<Option<Game>, StoreError> {
        Ok(self.games()?.get(&id).cloned())
    }

    async fn find_games(&self, ids: &[ObjectId]) -> Result<Vec<Game>, StoreError> {
        let games = self.games()?;
        Ok(ids.iter().filter_map(|id| games.get(id).cloned()).collect())
    }

    async fn insert_game(&self, game: NewGame) -> Result<Game, StoreError> {
        let game = game.into_game(ObjectId::new(), Utc::now());
        self.games_mut()?.insert(game.id, game.clone());
        Ok(game)
    }

    async fn replace_game(&self, mut game: Game) -> Result<Option<Game>, StoreError> {
        let mut games = self.games_mut()?;
        match games.get_mut(&game.id) {
            Some(slot) => {
                game.created_at = slot.created_at;
                game.updated_at = Utc::now();
                *slot = game.clone();
                Ok(Some(game))
            }
            None => Ok(None),
        }
    }

    async fn delete_game(&self, id: ObjectId) -> Result<bool, StoreError> {
        Ok(self.games_mut()?.remove(&id).is_some())
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        Ok(self.reviews()?.values().cloned().collect())
    }

    async fn find_review(&self, id: ObjectId) -> Result<Option<Review>, StoreError> {
        Ok(self.reviews()?.get(&id).cloned())
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, StoreError> {
        let review = review.into_review(ObjectId::new(), Utc::now());
        self.reviews_mut()?.insert(review.id, review.clone());
        Ok(review)
    }

    async fn replace_review(&self, mut review: Review) -> Result<Option<Review>, StoreError> {
        let mut reviews = self.reviews_mut()?;
        match reviews.get_mut(&review.id) {
            Some(slot) => {
                review.created_at = slot.created_at;
                review.updated_at = Utc::now();
                *slot = review.clone();
                Ok(Some(review))
            }
            None => Ok(None),
        }
    }

    async fn delete_review(&self, id: ObjectId) -> Result<bool, StoreError> {
        Ok(self.reviews_mut()?.remove(&id).is_some())
    }
}
