use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

use super::session::GameStatus;
use crate::ledger::LedgerError;

/// Coarse classification of a `GameError`, carried on error events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ErrorKind {
    ChallengeUnavailable,
    InvalidGuess,
    ScoringFailed,
    InvalidState,
    ScoreSubmissionFailed,
    DuplicateRound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Could not load a paper: {0}")]
    ChallengeUnavailable(String),

    #[error("Invalid guess: {0}")]
    InvalidGuess(String),

    #[error("Could not score guess: {0}")]
    ScoringFailed(String),

    #[error("Cannot {operation} while {status}")]
    InvalidState {
        operation: &'static str,
        status: GameStatus,
    },

    #[error("Could not submit final score: {0}")]
    ScoreSubmissionFailed(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::ChallengeUnavailable(_) => ErrorKind::ChallengeUnavailable,
            GameError::InvalidGuess(_) => ErrorKind::InvalidGuess,
            GameError::ScoringFailed(_) => ErrorKind::ScoringFailed,
            GameError::InvalidState { .. } => ErrorKind::InvalidState,
            GameError::ScoreSubmissionFailed(_) => ErrorKind::ScoreSubmissionFailed,
            GameError::Ledger(LedgerError::DuplicateRound(_)) => ErrorKind::DuplicateRound,
        }
    }

    /// Whether the player can simply try the same operation again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GameError::ChallengeUnavailable(_)
                | GameError::InvalidGuess(_)
                | GameError::ScoringFailed(_)
        )
    }
}
