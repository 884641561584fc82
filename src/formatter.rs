//! Human-readable rendering of round results.
//!
//! Everything in here is pure: the same input always produces the same text,
//! so the presentation layer can call these as often as it likes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// How much of a date the server actually knows
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    /// `YYYY-MM`, no day component
    Month,
    /// `YYYY-MM-DD`
    Day,
}

/// A publication date as reported by the scoring service.
///
/// Month-precision dates are pinned to the first of the month so that they can
/// still be compared and subtracted like any other calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PaperDate {
    date: NaiveDate,
    precision: DatePrecision,
}

impl PaperDate {
    pub fn day(date: NaiveDate) -> Self {
        Self {
            date,
            precision: DatePrecision::Day,
        }
    }

    /// Parses the two shapes the service emits: `YYYY-MM-DD` and `YYYY-MM`
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        let trimmed = raw.trim();
        let invalid = || FormatError::InvalidDate(raw.to_string());

        match trimmed.split('-').count() {
            2 => NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
                .map(|date| Self {
                    date,
                    precision: DatePrecision::Month,
                })
                .map_err(|_| invalid()),
            3 => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Self::day)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }

    /// Long English form, e.g. "March 2021" or "March 14, 2021"
    pub fn to_long_string(&self) -> String {
        format_date(self.date, self.precision)
    }
}

impl fmt::Display for PaperDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            DatePrecision::Month => write!(f, "{}", self.date.format("%Y-%m")),
            DatePrecision::Day => write!(f, "{}", self.date.format("%Y-%m-%d")),
        }
    }
}

impl From<PaperDate> for String {
    fn from(value: PaperDate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for PaperDate {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PaperDate::parse(&value)
    }
}

/// Describes how far off a guess was.
///
/// Months are 30 days and years are 365 days; both round half up.
pub fn format_difference(difference_days: u32) -> String {
    let days = u64::from(difference_days);
    match days {
        0 => "Perfect match!".to_string(),
        1 => "1 day".to_string(),
        2..=29 => format!("{days} days"),
        30..=364 => {
            let months = round_half_up(days, 30);
            let suffix = if months == 1 { "" } else { "s" };
            format!("About {months} month{suffix}")
        }
        _ => {
            let tenths = round_half_up(days * 10, 365);
            let suffix = if tenths == 10 { "" } else { "s" };
            format!("About {}.{} year{suffix}", tenths / 10, tenths % 10)
        }
    }
}

pub fn format_date(date: NaiveDate, precision: DatePrecision) -> String {
    match precision {
        DatePrecision::Month => date.format("%B %Y").to_string(),
        DatePrecision::Day => date.format("%B %-d, %Y").to_string(),
    }
}

/// Formats a raw wire date, inferring the precision from its shape
pub fn format_paper_date(raw: &str) -> Result<String, FormatError> {
    PaperDate::parse(raw).map(|date| date.to_long_string())
}

fn round_half_up(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}
