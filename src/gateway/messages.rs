use serde::{Deserialize, Serialize};

/// Message that signals a new personal best in a submit-score acknowledgement
pub const NEW_HIGH_SCORE_MESSAGE: &str = "New high score!";

/// GET /game/fetch-paper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchPaperResponse {
    #[serde(default)]
    pub id: u32,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub date: String,
}

/// POST /game/calculate-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateScoreRequest {
    pub actual_date: String,
    pub guess_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateScoreResponse {
    pub actual_date: String,
    pub difference_days: u32,
    pub score: u32,
}

/// POST /game/submit-score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    pub score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}
