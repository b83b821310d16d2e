use serde::Serialize;

/// Genre reported when no reviewed game qualifies.
pub const NO_GENRE: &str = "N/A";

/// Summary report over the whole store.
///
/// `totalGamesReviewed` counts distinct games referenced by at least one
/// review, and `totalReviews` counts review records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_games_reviewed: usize,
    pub total_reviews: usize,
    /// Mean review rating rounded to one decimal; `null` without reviews.
    pub avg_rating: Option<f64>,
    pub total_hours_played: f64,
    pub most_played_genre: String,
}
