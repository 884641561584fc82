use axum::{extract::State, Json};
use chrono::NaiveDate;
use tracing::{info, instrument};

use super::models::{LeaderboardEntry, Paper, ScoreReport};
use super::scoring::{score_guess, MAX_SCORE};
use crate::formatter::PaperDate;
use crate::gateway::messages::{
    CalculateScoreRequest, FetchPaperResponse, SubmitScoreRequest, SubmitScoreResponse,
};
use crate::gateway::NEW_HIGH_SCORE_MESSAGE;
use crate::shared::{AppError, AppState};

/// Player name used when a submission does not carry one
pub const ANONYMOUS_PLAYER: &str = "anonymous";

/// Rows returned by GET /game/leaderboard
pub const LEADERBOARD_SIZE: usize = 10;

/// GET /game/fetch-paper
///
/// Returns a random paper, or a placeholder when the catalogue is empty
#[instrument(name = "fetch_paper", skip(state))]
pub async fn fetch_paper(
    State(state): State<AppState>,
) -> Result<Json<FetchPaperResponse>, AppError> {
    let paper = state
        .paper_repository
        .random_paper()
        .await?
        .unwrap_or_else(Paper::placeholder);

    info!(paper_id = paper.id, "Serving paper");

    Ok(Json(FetchPaperResponse {
        id: paper.id,
        abstract_text: paper.abstract_text,
        date: paper.date,
    }))
}

/// POST /game/calculate-score
#[instrument(name = "calculate_score", skip(_state))]
pub async fn calculate_score(
    State(_state): State<AppState>,
    Json(request): Json<CalculateScoreRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let actual = PaperDate::parse(&request.actual_date)
        .map_err(|e| AppError::BadRequest(format!("Error calculating score: {}", e)))?;
    let guess = NaiveDate::parse_from_str(request.guess_date.trim(), "%Y-%m-%d").map_err(|e| {
        AppError::BadRequest(format!(
            "Error calculating score: invalid guess date {}: {}",
            request.guess_date, e
        ))
    })?;

    let breakdown = score_guess(actual.date(), guess);

    info!(
        difference_days = breakdown.difference_days,
        score = breakdown.score,
        category = %breakdown.category,
        "Guess scored"
    );

    Ok(Json(ScoreReport {
        status: "success".to_string(),
        score: breakdown.score,
        difference_days: breakdown.difference_days,
        actual_date: actual.to_string(),
        category: breakdown.category,
        explanation: breakdown.explanation(),
        max_possible: MAX_SCORE,
        scoring_details: breakdown.details(),
    }))
}

/// POST /game/submit-score
#[instrument(name = "submit_score", skip(state))]
pub async fn submit_score(
    State(state): State<AppState>,
    Json(request): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    let player = request
        .player
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS_PLAYER);

    let is_new_best = state
        .high_score_repository
        .record_score(player, request.score)
        .await?;

    info!(player, score = request.score, is_new_best, "Score submitted");

    let message = if is_new_best {
        NEW_HIGH_SCORE_MESSAGE
    } else {
        "Score submitted"
    };

    Ok(Json(SubmitScoreResponse {
        status: Some("success".to_string()),
        message: message.to_string(),
    }))
}

/// GET /game/leaderboard
#[instrument(name = "leaderboard", skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let leaders = state
        .high_score_repository
        .top_scores(LEADERBOARD_SIZE)
        .await?;

    info!(rows = leaders.len(), "Serving leaderboard");

    Ok(Json(leaders))
}
