use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::server::repository::{HighScoreRepository, PaperRepository};

/// Shared application state for the scoring service
#[derive(Clone)]
pub struct AppState {
    pub paper_repository: Arc<dyn PaperRepository>,
    pub high_score_repository: Arc<dyn HighScoreRepository>,
}

impl AppState {
    pub fn new(
        paper_repository: Arc<dyn PaperRepository>,
        high_score_repository: Arc<dyn HighScoreRepository>,
    ) -> Self {
        Self {
            paper_repository,
            high_score_repository,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::StorageError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", msg),
            ),
        };

        let body = Json(json!({
            "status": "error",
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::server::models::Paper;
    use crate::server::repository::{InMemoryHighScoreRepository, InMemoryPaperRepository};

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        papers: Vec<Paper>,
        high_score_repository: Option<Arc<dyn HighScoreRepository>>,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                papers: Vec::new(),
                high_score_repository: None,
            }
        }

        pub fn with_paper(mut self, id: u32, abstract_text: &str, date: &str) -> Self {
            self.papers.push(Paper {
                id,
                abstract_text: abstract_text.to_string(),
                date: date.to_string(),
            });
            self
        }

        pub fn with_high_score_repository(mut self, repo: Arc<dyn HighScoreRepository>) -> Self {
            self.high_score_repository = Some(repo);
            self
        }

        pub fn build(self) -> AppState {
            AppState {
                paper_repository: Arc::new(InMemoryPaperRepository::new(self.papers)),
                high_score_repository: self
                    .high_score_repository
                    .unwrap_or_else(|| Arc::new(InMemoryHighScoreRepository::new())),
            }
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
