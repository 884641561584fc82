use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::formatter::{format_date, DatePrecision, PaperDate};

/// The resolved result of a single round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub round_index: u32,
    pub guessed_date: NaiveDate,
    pub actual_date: PaperDate,
    pub difference_days: u32,
    pub score: u32,
}

impl GuessOutcome {
    /// One line of the end-of-game breakdown
    pub fn summary(&self) -> String {
        format!(
            "Round {}: You guessed {}, actual was {} ({} points)",
            self.round_index,
            format_date(self.guessed_date, DatePrecision::Day),
            self.actual_date.to_long_string(),
            self.score
        )
    }
}
