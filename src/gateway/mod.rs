// Boundary to the remote scoring service
//
// The game core only ever talks to the service through `ScoringGateway`, so the
// HTTP client can be swapped for a scripted one in tests.

pub use errors::GatewayError;
pub use http::HttpScoringGateway;
pub use messages::NEW_HIGH_SCORE_MESSAGE;

mod errors;
mod http;
pub mod messages;

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;

/// The server's answer for a challenge.
///
/// Carried through the client untouched and echoed back when scoring. It is
/// deliberately not `Display` and its `Debug` output is redacted so it cannot
/// leak into a rendered view or a log line before the round resolves.
#[derive(Clone, PartialEq, Eq)]
pub struct HiddenDate(String);

impl HiddenDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for gateways that need to send it back over the wire
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HiddenDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HiddenDate(<hidden>)")
    }
}

/// A paper abstract awaiting a guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub abstract_text: String,
    pub hidden_date: HiddenDate,
}

impl Challenge {
    pub fn new(abstract_text: impl Into<String>, hidden_date: HiddenDate) -> Self {
        Self {
            abstract_text: abstract_text.into(),
            hidden_date,
        }
    }
}

/// Scoring service verdict for one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredGuess {
    /// Wire form, `YYYY-MM-DD` or `YYYY-MM`
    pub actual_date: String,
    pub difference_days: u32,
    pub score: u32,
}

/// Acknowledgement of a final score submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAck {
    pub accepted: bool,
    pub is_new_high_score: bool,
    pub message: String,
}

impl SubmissionAck {
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            accepted: true,
            is_new_high_score: message == NEW_HIGH_SCORE_MESSAGE,
            message,
        }
    }
}

#[async_trait]
pub trait ScoringGateway: Send + Sync {
    /// Fetch a fresh abstract together with its hidden publication date
    async fn fetch_challenge(&self) -> Result<Challenge, GatewayError>;

    /// Score a guess against the challenge's hidden date
    async fn score_guess(
        &self,
        challenge: &Challenge,
        guessed_date: NaiveDate,
    ) -> Result<ScoredGuess, GatewayError>;

    /// Best-effort submission of a session total
    async fn submit_final_score(&self, total: u32) -> Result<SubmissionAck, GatewayError>;
}
