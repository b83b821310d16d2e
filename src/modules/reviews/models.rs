use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gametracker_db::{parse_object_id, ObjectId};
use gametracker_http::error::{AppError, FieldErrors};

use crate::utils::{double_option, serialize_object_id};

/// Author recorded when a review is submitted without one.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Title reported for reviews whose game can no longer be resolved.
pub const UNKNOWN_GAME_TITLE: &str = "Unknown Game";

pub const MIN_REVIEW_RATING: f64 = 1.0;
pub const MAX_REVIEW_RATING: f64 = 5.0;

/// A stored review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    pub id: ObjectId,
    #[serde(serialize_with = "serialize_object_id")]
    pub game: ObjectId,
    pub author: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review as returned by the API, carrying the title of its game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub game_title: String,
}

impl ReviewView {
    pub fn new(review: Review, game_title: Option<String>) -> Self {
        Self {
            review,
            game_title: game_title.unwrap_or_else(|| UNKNOWN_GAME_TITLE.to_string()),
        }
    }
}

/// A validated review ready to be inserted. The game reference is well formed
/// but its existence still has to be checked against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub game: ObjectId,
    pub author: String,
    pub rating: f64,
    pub comment: String,
}

impl NewReview {
    pub fn into_review(self, id: ObjectId, now: DateTime<Utc>) -> Review {
        Review {
            id,
            game: self.game,
            author: self.author,
            rating: self.rating,
            comment: self.comment,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body of `POST /api/reviews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReview {
    pub game: Option<String>,
    pub author: Option<String>,
    pub rating: Option<f64>,
    #[serde(alias = "content")]
    pub comment: Option<String>,
}

impl CreateReview {
    pub fn validate(self) -> Result<NewReview, AppError> {
        let mut errors = FieldErrors::new();

        let game = match self.game.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("game", "game is required");
                None
            }
            Some(raw) => check_game_ref(&mut errors, raw),
        };

        let rating = match self.rating {
            None => {
                errors.push("rating", "rating is required");
                None
            }
            Some(rating) => check_rating(&mut errors, rating),
        };

        let comment = match self.comment {
            Some(comment) if !comment.trim().is_empty() => Some(comment),
            _ => {
                errors.push("comment", "comment is required");
                None
            }
        };

        errors.finish()?;

        match (game, rating, comment) {
            (Some(game), Some(rating), Some(comment)) => Ok(NewReview {
                game,
                author: author_or_default(self.author),
                rating,
                comment,
            }),
            _ => Err(AppError::invalid_field("review", "review is incomplete")),
        }
    }
}

/// Request body of `PUT /api/reviews/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReview {
    pub game: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub author: Option<Option<String>>,
    pub rating: Option<f64>,
    #[serde(alias = "content")]
    pub comment: Option<String>,
}

impl UpdateReview {
    /// Validate supplied fields and return the new game reference, if any.
    /// A blank `game` leaves the reference unchanged.
    pub fn validate(&self) -> Result<Option<ObjectId>, AppError> {
        let mut errors = FieldErrors::new();

        let game = self
            .game
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| check_game_ref(&mut errors, raw));
        if let Some(rating) = self.rating {
            check_rating(&mut errors, rating);
        }
        if matches!(&self.comment, Some(comment) if comment.trim().is_empty()) {
            errors.push("comment", "comment cannot be empty");
        }

        errors.finish()?;
        Ok(game)
    }

    /// Write every supplied field onto `review`. The game reference is
    /// handled by the caller once its existence is confirmed.
    pub fn apply_to(self, review: &mut Review, game: Option<ObjectId>) {
        if let Some(game) = game {
            review.game = game;
        }
        if let Some(author) = self.author {
            review.author = author_or_default(author);
        }
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(comment) = self.comment {
            review.comment = comment;
        }
    }
}

fn check_game_ref(errors: &mut FieldErrors, raw: &str) -> Option<ObjectId> {
    match parse_object_id(raw) {
        Ok(id) => Some(id),
        Err(err) => {
            errors.push("game", format!("Invalid game id: {}", err));
            None
        }
    }
}

fn check_rating(errors: &mut FieldErrors, rating: f64) -> Option<f64> {
    if rating.is_finite() && (MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&rating) {
        Some(rating)
    } else {
        errors.push("rating", "rating must be between 1 and 5");
        None
    }
}

fn author_or_default(author: Option<String>) -> String {
    author
        .filter(|author| !author.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message_of(result: Result<impl std::fmt::Debug, AppError>) -> String {
        match result {
            Err(AppError::Validation { message, .. }) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_lists_all_missing_fields() {
        let input: CreateReview = serde_json::from_value(json!({ "author": "Ana" })).unwrap();
        assert_eq!(
            message_of(input.validate()),
            "game is required, rating is required, comment is required"
        );
    }

    #[test]
    fn create_rejects_ratings_outside_one_to_five() {
        let game = ObjectId::new().to_hex();
        for rating in [0.0, 6.0, -3.0] {
            let input = CreateReview {
                game: Some(game.clone()),
                rating: Some(rating),
                comment: Some("Great".to_string()),
                ..Default::default()
            };
            assert_eq!(message_of(input.validate()), "rating must be between 1 and 5");
        }
    }

    #[test]
    fn create_rejects_malformed_game_reference() {
        let input = CreateReview {
            game: Some("12345".to_string()),
            rating: Some(3.0),
            comment: Some("ok".to_string()),
            ..Default::default()
        };
        assert!(message_of(input.validate()).starts_with("Invalid game id"));
    }

    #[test]
    fn create_defaults_author_and_accepts_content_alias() {
        let game = ObjectId::new();
        let input: CreateReview = serde_json::from_value(json!({
            "game": game.to_hex(),
            "rating": 4,
            "content": "Loved it",
            "author": "  "
        }))
        .unwrap();

        let review = input.validate().unwrap();
        assert_eq!(review.game, game);
        assert_eq!(review.author, DEFAULT_AUTHOR);
        assert_eq!(review.comment, "Loved it");
        assert_eq!(review.rating, 4.0);
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut review = NewReview {
            game: ObjectId::new(),
            author: "Ana".to_string(),
            rating: 2.0,
            comment: "meh".to_string(),
        }
        .into_review(ObjectId::new(), Utc::now());

        let update: UpdateReview =
            serde_json::from_value(json!({ "rating": 5, "author": null })).unwrap();
        let new_game = update.validate().unwrap();
        assert!(new_game.is_none());
        update.apply_to(&mut review, new_game);

        assert_eq!(review.rating, 5.0);
        assert_eq!(review.author, DEFAULT_AUTHOR);
        assert_eq!(review.comment, "meh");
    }

    #[test]
    fn update_validates_new_game_reference() {
        let update: UpdateReview = serde_json::from_value(json!({ "game": "nope" })).unwrap();
        assert!(message_of(update.validate()).starts_with("Invalid game id"));

        let target = ObjectId::new();
        let update: UpdateReview =
            serde_json::from_value(json!({ "game": target.to_hex() })).unwrap();
        assert_eq!(update.validate().unwrap(), Some(target));
    }

    #[test]
    fn update_treats_blank_game_as_unchanged() {
        for raw in ["", "   "] {
            let update: UpdateReview =
                serde_json::from_value(json!({ "game": raw, "rating": 2 })).unwrap();
            assert_eq!(update.validate().unwrap(), None);
        }
    }

    #[test]
    fn views_fall_back_to_unknown_game() {
        let review = NewReview {
            game: ObjectId::new(),
            author: DEFAULT_AUTHOR.to_string(),
            rating: 3.0,
            comment: "fine".to_string(),
        }
        .into_review(ObjectId::new(), Utc::now());

        let value = serde_json::to_value(ReviewView::new(review.clone(), None)).unwrap();
        assert_eq!(value["gameTitle"], json!(UNKNOWN_GAME_TITLE));
        assert_eq!(value["game"], json!(review.game.to_hex()));
        assert_eq!(value["_id"], json!(review.id.to_hex()));
    }
}
