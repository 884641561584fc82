// Scoring service
//
// HTTP backend the game client talks to: serves papers, scores guesses and
// keeps per-player high scores (and their leaderboard) for the lifetime of the
// process.

pub use handlers::{ANONYMOUS_PLAYER, LEADERBOARD_SIZE};
pub use repository::{
    HighScoreRepository, InMemoryHighScoreRepository, InMemoryPaperRepository, PaperRepository,
};
pub use scoring::{score_guess, ScoreBreakdown, ScoreCategory};

mod handlers;
pub mod models;
pub mod repository;
pub mod scoring;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::shared::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/game/fetch-paper", get(handlers::fetch_paper))
        .route("/game/calculate-score", post(handlers::calculate_score))
        .route("/game/submit-score", post(handlers::submit_score))
        .route("/game/leaderboard", get(handlers::leaderboard))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
