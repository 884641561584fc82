use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{ErrorKind, GameStatus};
use crate::ledger::GuessOutcome;

/// Events published by the game controller
///
/// Events represent facts about things that have already happened. The hidden
/// answer of a challenge never appears in an event until its round resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The state machine moved between two states
    StatusChanged {
        session_id: Uuid,
        from: GameStatus,
        to: GameStatus,
    },

    /// A new abstract is ready to be guessed
    ChallengeReady {
        session_id: Uuid,
        round: u32,
        abstract_text: String,
    },

    /// A guess was scored and recorded
    RoundResolved {
        session_id: Uuid,
        outcome: GuessOutcome,
        running_total: u32,
    },

    /// The last round was acknowledged and the session ended
    GameOver {
        session_id: Uuid,
        final_total: u32,
        rounds: Vec<GuessOutcome>,
    },

    /// The scoring service acknowledged the final total
    ScoreSubmitted {
        session_id: Uuid,
        accepted: bool,
        message: String,
    },

    /// The final total beat the player's previous best
    NewHighScore { session_id: Uuid, total: u32 },

    /// An operation failed; the session stays in its pre-call state
    Error {
        session_id: Uuid,
        kind: ErrorKind,
        message: String,
    },
}

impl GameEvent {
    /// Get the session this event belongs to
    pub fn session_id(&self) -> Uuid {
        match self {
            GameEvent::StatusChanged { session_id, .. } => *session_id,
            GameEvent::ChallengeReady { session_id, .. } => *session_id,
            GameEvent::RoundResolved { session_id, .. } => *session_id,
            GameEvent::GameOver { session_id, .. } => *session_id,
            GameEvent::ScoreSubmitted { session_id, .. } => *session_id,
            GameEvent::NewHighScore { session_id, .. } => *session_id,
            GameEvent::Error { session_id, .. } => *session_id,
        }
    }

    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::StatusChanged { .. } => "status_changed",
            GameEvent::ChallengeReady { .. } => "challenge_ready",
            GameEvent::RoundResolved { .. } => "round_resolved",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::ScoreSubmitted { .. } => "score_submitted",
            GameEvent::NewHighScore { .. } => "new_high_score",
            GameEvent::Error { .. } => "error",
        }
    }
}
