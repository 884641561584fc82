use serde::{Deserialize, Serialize};

use super::scoring::ScoreCategory;

/// A paper in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub id: u32,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// `YYYY-MM-DD` or `YYYY-MM`
    pub date: String,
}

impl Paper {
    /// Served when the catalogue is empty so the game can still be played
    pub fn placeholder() -> Self {
        Self {
            id: 0,
            abstract_text: "No papers found in the database. Please add some papers first."
                .to_string(),
            date: "2020-01-01".to_string(),
        }
    }
}

/// Body of a successful POST /game/calculate-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub status: String,
    pub score: u32,
    pub difference_days: u32,
    pub actual_date: String,
    pub category: ScoreCategory,
    pub explanation: String,
    pub max_possible: u32,
    pub scoring_details: ScoringDetails,
}

/// Thresholds behind a score, echoed back so clients can explain it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringDetails {
    pub full_points_threshold_days: f64,
    pub zero_points_threshold_days: f64,
    pub within_full_range: bool,
    /// Rounded to two decimals
    pub years_difference: f64,
}

/// One row of GET /game/leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub high_score: u32,
}
