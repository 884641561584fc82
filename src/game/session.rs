use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use uuid::Uuid;

use crate::gateway::Challenge;
use crate::ledger::{GuessOutcome, LedgerError, RoundLedger};

/// Where a session is in the round lifecycle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum GameStatus {
    Idle,
    AwaitingPaper,
    AwaitingGuess,
    RoundResolved,
    GameOver,
}

/// All state of one play-through.
///
/// Only `GameController` holds a mutable session; the mutators here keep
/// status, round index, ledger and active challenge consistent with each other.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    status: GameStatus,
    current_round: u32,
    ledger: RoundLedger,
    active_challenge: Option<Challenge>,
    started_on: NaiveDate,
    score_submitted: bool,
}

impl GameSession {
    pub fn idle(today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: GameStatus::Idle,
            current_round: 0,
            ledger: RoundLedger::new(),
            active_challenge: None,
            started_on: today,
            score_submitted: false,
        }
    }

    /// A fresh session at round 1 waiting for its first paper
    pub fn start(today: NaiveDate) -> Self {
        Self {
            status: GameStatus::AwaitingPaper,
            current_round: 1,
            ..Self::idle(today)
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn ledger(&self) -> &RoundLedger {
        &self.ledger
    }

    pub fn active_challenge(&self) -> Option<&Challenge> {
        self.active_challenge.as_ref()
    }

    /// The day the session started; guesses may not be later than this
    pub fn started_on(&self) -> NaiveDate {
        self.started_on
    }

    /// Whether the final total has already been handed to the scoring service
    pub fn score_submitted(&self) -> bool {
        self.score_submitted
    }

    pub(crate) fn present_challenge(&mut self, challenge: Challenge) {
        self.active_challenge = Some(challenge);
        self.status = GameStatus::AwaitingGuess;
    }

    pub(crate) fn resolve_round(&mut self, outcome: GuessOutcome) -> Result<(), LedgerError> {
        self.ledger.append(outcome)?;
        self.active_challenge = None;
        self.status = GameStatus::RoundResolved;
        Ok(())
    }

    pub(crate) fn begin_next_round(&mut self) {
        self.current_round += 1;
        self.status = GameStatus::AwaitingPaper;
    }

    pub(crate) fn finish(&mut self) {
        self.status = GameStatus::GameOver;
    }

    pub(crate) fn mark_score_submitted(&mut self) {
        self.score_submitted = true;
    }
}
