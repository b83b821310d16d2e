//! Statistics over games and reviews, recomputed on every request.

use std::collections::HashMap;

use gametracker_db::ObjectId;
use gametracker_http::error::AppError;

use super::models::{Stats, NO_GENRE};
use crate::modules::games::models::Game;
use crate::modules::reviews::models::Review;
use crate::store::Store;

/// Review count for one referenced game.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GameReviews {
    game: ObjectId,
    count: usize,
}

pub async fn compute(store: &dyn Store) -> Result<Stats, AppError> {
    let reviews = store.list_reviews().await?;
    let games = store.list_games().await?;
    Ok(summarize(&games, &reviews))
}

/// Combine both collections into one report.
pub fn summarize(games: &[Game], reviews: &[Review]) -> Stats {
    let per_game = group_by_game(reviews);

    let avg_rating = if reviews.is_empty() {
        None
    } else {
        let total: f64 = reviews.iter().map(|review| review.rating).sum();
        Some(round_to_tenth(total / reviews.len() as f64))
    };

    Stats {
        total_games_reviewed: per_game.len(),
        total_reviews: reviews.len(),
        avg_rating,
        total_hours_played: games.iter().map(|game| game.hours_played).sum(),
        most_played_genre: most_reviewed_genre(games, &per_game),
    }
}

/// Review counts per game reference, in order of each game's first review.
fn group_by_game(reviews: &[Review]) -> Vec<GameReviews> {
    let mut groups: Vec<GameReviews> = Vec::new();
    let mut positions: HashMap<ObjectId, usize> = HashMap::new();

    for review in reviews {
        match positions.get(&review.game) {
            Some(&position) => groups[position].count += 1,
            None => {
                positions.insert(review.game, groups.len());
                groups.push(GameReviews {
                    game: review.game,
                    count: 1,
                });
            }
        }
    }

    groups
}

/// Genre of the most reviewed game that still exists. Ties keep the earliest group.
fn most_reviewed_genre(games: &[Game], per_game: &[GameReviews]) -> String {
    let games_by_id: HashMap<ObjectId, &Game> = games.iter().map(|game| (game.id, game)).collect();

    let mut best: Option<(&Game, usize)> = None;
    for group in per_game {
        let Some(game) = games_by_id.get(&group.game) else {
            continue;
        };
        if best.map_or(true, |(_, count)| group.count > count) {
            best = Some((game, group.count));
        }
    }

    best.and_then(|(game, _)| game.genre.clone())
        .filter(|genre| !genre.trim().is_empty())
        .unwrap_or_else(|| NO_GENRE.to_string())
}

/// One decimal place, ties to even.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::games::models::CreateGame;
    use crate::modules::reviews::models::NewReview;
    use chrono::Utc;

    fn game(title: &str, genre: Option<&str>, hours_played: f64) -> Game {
        CreateGame {
            title: Some(title.to_string()),
            genre: genre.map(str::to_string),
            hours_played: Some(hours_played),
            ..Default::default()
        }
        .validate()
        .unwrap()
        .into_game(ObjectId::new(), Utc::now())
    }

    fn review(game: &Game, rating: f64) -> Review {
        NewReview {
            game: game.id,
            author: "tester".to_string(),
            rating,
            comment: "noted".to_string(),
        }
        .into_review(ObjectId::new(), Utc::now())
    }

    #[test]
    fn summarizes_reference_example() {
        let a = game("A", Some("RPG"), 10.0);
        let b = game("B", Some("FPS"), 5.0);
        let reviews = vec![review(&a, 4.0), review(&a, 2.0), review(&b, 5.0)];

        let stats = summarize(&[a, b], &reviews);
        assert_eq!(
            stats,
            Stats {
                total_games_reviewed: 2,
                total_reviews: 3,
                avg_rating: Some(3.7),
                total_hours_played: 15.0,
                most_played_genre: "RPG".to_string(),
            }
        );
    }

    #[test]
    fn empty_store_has_no_average_and_no_genre() {
        let stats = summarize(&[game("Solo", Some("Puzzle"), 3.5)], &[]);
        assert_eq!(stats.avg_rating, None);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.total_games_reviewed, 0);
        assert_eq!(stats.total_hours_played, 3.5);
        assert_eq!(stats.most_played_genre, NO_GENRE);

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["avgRating"].is_null());
    }

    #[test]
    fn ties_go_to_the_first_reviewed_game() {
        let a = game("A", Some("Platformer"), 0.0);
        let b = game("B", Some("Strategy"), 0.0);
        let reviews = vec![review(&b, 3.0), review(&a, 3.0), review(&a, 4.0), review(&b, 5.0)];

        assert_eq!(summarize(&[a, b], &reviews).most_played_genre, "Strategy");
    }

    #[test]
    fn deleted_games_count_as_reviewed_but_not_for_genre() {
        let kept = game("Kept", Some("Racing"), 2.0);
        let deleted = game("Deleted", Some("Horror"), 100.0);
        let reviews = vec![
            review(&deleted, 5.0),
            review(&deleted, 5.0),
            review(&kept, 1.0),
        ];

        let stats = summarize(&[kept], &reviews);
        assert_eq!(stats.total_games_reviewed, 2);
        assert_eq!(stats.total_hours_played, 2.0);
        assert_eq!(stats.most_played_genre, "Racing");
        assert_eq!(stats.avg_rating, Some(3.7));
    }

    #[test]
    fn winning_game_without_genre_reports_sentinel() {
        let untagged = game("Untagged", None, 0.0);
        let tagged = game("Tagged", Some("RPG"), 0.0);
        let reviews = vec![review(&untagged, 2.0), review(&untagged, 3.0), review(&tagged, 4.0)];

        assert_eq!(summarize(&[untagged, tagged], &reviews).most_played_genre, NO_GENRE);
    }

    #[test]
    fn averages_round_half_to_even() {
        assert_eq!(round_to_tenth(3.25), 3.2);
        assert_eq!(round_to_tenth(3.35), 3.4);
        assert_eq!(round_to_tenth(4.0), 4.0);
        assert_eq!(round_to_tenth(11.0 / 3.0), 3.7);
    }

    #[test]
    fn quarter_averages_round_to_even_tenth() {
        let only = game("Only", Some("Puzzle"), 1.0);
        let reviews: Vec<_> = [3.0, 3.0, 3.0, 4.0]
            .into_iter()
            .map(|rating| review(&only, rating))
            .collect();

        assert_eq!(summarize(&[only], &reviews).avg_rating, Some(3.2));
    }
}
