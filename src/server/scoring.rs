use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::models::ScoringDetails;

pub const MAX_SCORE: u32 = 100;
/// Six months (365.25 / 2)
pub const FULL_POINTS_THRESHOLD_DAYS: f64 = 182.5;
/// Three years
pub const ZERO_POINTS_THRESHOLD_DAYS: f64 = 1095.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ScoreCategory {
    #[strum(serialize = "Perfect Range")]
    #[serde(rename = "Perfect Range")]
    PerfectRange,
    #[strum(serialize = "Partial Points")]
    #[serde(rename = "Partial Points")]
    PartialPoints,
    #[strum(serialize = "No Points")]
    #[serde(rename = "No Points")]
    NoPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub difference_days: u32,
    pub score: u32,
    pub category: ScoreCategory,
}

impl ScoreBreakdown {
    pub fn details(&self) -> ScoringDetails {
        let years = f64::from(self.difference_days) / 365.25;
        ScoringDetails {
            full_points_threshold_days: FULL_POINTS_THRESHOLD_DAYS,
            zero_points_threshold_days: ZERO_POINTS_THRESHOLD_DAYS,
            within_full_range: f64::from(self.difference_days) <= FULL_POINTS_THRESHOLD_DAYS,
            years_difference: (years * 100.0).round() / 100.0,
        }
    }

    pub fn explanation(&self) -> String {
        match self.category {
            ScoreCategory::PerfectRange => "Within 6 months - full points!".to_string(),
            ScoreCategory::NoPoints => "More than 3 years off - no points".to_string(),
            ScoreCategory::PartialPoints => format!(
                "About {:.1} years off - partial points",
                f64::from(self.difference_days) / 365.25
            ),
        }
    }
}

/// Scores a guess by its distance from the publication date.
///
/// Full marks within six months, nothing from three years on, and a linear
/// drop in between.
pub fn score_guess(actual: NaiveDate, guess: NaiveDate) -> ScoreBreakdown {
    let difference_days = u32::try_from((actual - guess).num_days().unsigned_abs())
        .unwrap_or(u32::MAX);
    let days = f64::from(difference_days);

    let (score, category) = if days <= FULL_POINTS_THRESHOLD_DAYS {
        (MAX_SCORE, ScoreCategory::PerfectRange)
    } else if days >= ZERO_POINTS_THRESHOLD_DAYS {
        (0, ScoreCategory::NoPoints)
    } else {
        let linear_range = ZERO_POINTS_THRESHOLD_DAYS - FULL_POINTS_THRESHOLD_DAYS;
        let reduction = (days - FULL_POINTS_THRESHOLD_DAYS) / linear_range * f64::from(MAX_SCORE);
        let score = (f64::from(MAX_SCORE) - reduction).round().max(0.0) as u32;
        (score, ScoreCategory::PartialPoints)
    };

    ScoreBreakdown {
        difference_days,
        score,
        category,
    }
}
