use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gametracker_db::ObjectId;
use gametracker_http::error::{AppError, FieldErrors};

use crate::utils::{double_option, serialize_object_id, ReleaseDate};

/// Cover shown for games created without one.
pub const DEFAULT_COVER_IMAGE_URL: &str = "https://placehold.co/300x400?text=No+Cover";

/// Upper bound of a game's personal rating.
pub const MAX_GAME_RATING: f64 = 5.0;

/// A tracked game as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    pub cover_image_url: String,
    pub completed: bool,
    pub hours_played: f64,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated game with every default resolved, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub title: String,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub cover_image_url: String,
    pub completed: bool,
    pub hours_played: f64,
    pub rating: f64,
}

impl NewGame {
    /// Materialize the stored record once the store has assigned identity and timestamps.
    pub fn into_game(self, id: ObjectId, now: DateTime<Utc>) -> Game {
        Game {
            id,
            title: self.title,
            genre: self.genre,
            platform: self.platform,
            developer: self.developer,
            publisher: self.publisher,
            description: self.description,
            release_date: self.release_date,
            cover_image_url: self.cover_image_url,
            completed: self.completed,
            hours_played: self.hours_played,
            rating: self.rating,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body of `POST /api/games`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGame {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<ReleaseDate>,
    pub cover_image_url: Option<String>,
    pub completed: Option<bool>,
    pub hours_played: Option<f64>,
    pub rating: Option<f64>,
}

impl CreateGame {
    /// Check required fields and ranges, then apply the default-value table.
    pub fn validate(self) -> Result<NewGame, AppError> {
        let mut errors = FieldErrors::new();

        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => {
                errors.push("title", "title is required");
                String::new()
            }
        };
        check_hours_played(&mut errors, self.hours_played);
        check_rating(&mut errors, self.rating);
        errors.finish()?;

        Ok(NewGame {
            title,
            genre: self.genre,
            platform: self.platform,
            developer: self.developer,
            publisher: self.publisher,
            description: self.description,
            release_date: self.release_date.map(ReleaseDate::into_inner),
            cover_image_url: self
                .cover_image_url
                .unwrap_or_else(|| DEFAULT_COVER_IMAGE_URL.to_string()),
            completed: self.completed.unwrap_or(false),
            hours_played: self.hours_played.unwrap_or(0.0),
            rating: self.rating.unwrap_or(0.0),
        })
    }
}

/// Request body of `PUT /api/games/{id}`.
///
/// Only fields present in the body are written. Nullable fields may be
/// cleared with an explicit `null`; `null` on `title`, `completed`,
/// `hoursPlayed` or `rating` counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGame {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub genre: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub platform: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub developer: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub publisher: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub release_date: Option<Option<ReleaseDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_image_url: Option<Option<String>>,
    pub completed: Option<bool>,
    pub hours_played: Option<f64>,
    pub rating: Option<f64>,
}

impl UpdateGame {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();

        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            errors.push("title", "title cannot be empty");
        }
        check_hours_played(&mut errors, self.hours_played);
        check_rating(&mut errors, self.rating);

        errors.finish()
    }

    /// Write every supplied field onto `game`. Call [`UpdateGame::validate`] first.
    pub fn apply_to(self, game: &mut Game) {
        if let Some(title) = self.title {
            game.title = title;
        }
        if let Some(genre) = self.genre {
            game.genre = genre;
        }
        if let Some(platform) = self.platform {
            game.platform = platform;
        }
        if let Some(developer) = self.developer {
            game.developer = developer;
        }
        if let Some(publisher) = self.publisher {
            game.publisher = publisher;
        }
        if let Some(description) = self.description {
            game.description = description;
        }
        if let Some(release_date) = self.release_date {
            game.release_date = release_date.map(ReleaseDate::into_inner);
        }
        if let Some(cover_image_url) = self.cover_image_url {
            game.cover_image_url =
                cover_image_url.unwrap_or_else(|| DEFAULT_COVER_IMAGE_URL.to_string());
        }
        if let Some(completed) = self.completed {
            game.completed = completed;
        }
        if let Some(hours_played) = self.hours_played {
            game.hours_played = hours_played;
        }
        if let Some(rating) = self.rating {
            game.rating = rating;
        }
    }
}

/// Body of `PATCH /api/games/{id}/completed`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetCompleted {
    pub completed: Option<bool>,
}

/// Body of `PATCH /api/games/{id}/rating`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetRating {
    pub rating: Option<f64>,
}

/// Body of `PATCH /api/games/{id}/hoursPlayed`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetHoursPlayed {
    pub hours_played: Option<f64>,
}

impl From<SetCompleted> for UpdateGame {
    fn from(patch: SetCompleted) -> Self {
        UpdateGame {
            completed: patch.completed,
            ..Default::default()
        }
    }
}

impl From<SetRating> for UpdateGame {
    fn from(patch: SetRating) -> Self {
        UpdateGame {
            rating: patch.rating,
            ..Default::default()
        }
    }
}

impl From<SetHoursPlayed> for UpdateGame {
    fn from(patch: SetHoursPlayed) -> Self {
        UpdateGame {
            hours_played: patch.hours_played,
            ..Default::default()
        }
    }
}

fn check_hours_played(errors: &mut FieldErrors, hours_played: Option<f64>) {
    if let Some(hours) = hours_played {
        if !hours.is_finite() || hours < 0.0 {
            errors.push("hoursPlayed", "hoursPlayed must be greater than or equal to 0");
        }
    }
}

fn check_rating(errors: &mut FieldErrors, rating: Option<f64>) {
    if let Some(rating) = rating {
        if !rating.is_finite() || !(0.0..=MAX_GAME_RATING).contains(&rating) {
            errors.push("rating", "rating must be between 0 and 5");
        }
    }
}
