use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::errors::GameError;
use super::session::{GameSession, GameStatus};
use crate::clock::{Clock, SystemClock};
use crate::config::GameConfig;
use crate::event::{EventBus, GameEvent};
use crate::formatter::PaperDate;
use crate::gateway::ScoringGateway;
use crate::ledger::{GuessOutcome, RoundLedger};

/// What `advance_round` led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    /// A new round started and its paper is ready
    NextRound { round: u32 },
    /// The last round was played; the final total is being submitted
    GameOver { final_total: u32 },
}

/// Round-lifecycle state machine for a single player.
///
/// Every operation checks the current status first and is rejected with
/// `GameError::InvalidState` when illegal, leaving the session untouched.
/// Gateway failures leave the session in its pre-call state so the same
/// operation can be retried. All failures are also published on the event bus.
pub struct GameController {
    gateway: Arc<dyn ScoringGateway>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
    event_bus: EventBus,
    session: GameSession,
    pending_submission: Option<JoinHandle<()>>,
}

impl GameController {
    pub fn builder(gateway: Arc<dyn ScoringGateway>) -> GameControllerBuilder {
        GameControllerBuilder::new(gateway)
    }

    pub fn status(&self) -> GameStatus {
        self.session.status()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn ledger(&self) -> &RoundLedger {
        self.session.ledger()
    }

    pub fn current_round(&self) -> u32 {
        self.session.current_round()
    }

    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Begin a new session and fetch the first paper.
    ///
    /// On `ChallengeUnavailable` the session stays in `AwaitingPaper`; use
    /// `retry_challenge` to try again.
    #[instrument(skip(self))]
    pub async fn start_game(&mut self) -> Result<(), GameError> {
        self.guard("start_game", &[GameStatus::Idle, GameStatus::GameOver])?;

        let from = self.session.status();
        self.pending_submission = None;
        self.session = GameSession::start(self.clock.today());

        info!(
            session_id = %self.session.id(),
            started_on = %self.session.started_on(),
            total_rounds = self.config.total_rounds,
            "Starting new game"
        );

        self.announce_transition(from);
        self.load_challenge().await
    }

    /// Fetch the current round's paper again after a failed attempt
    #[instrument(skip(self))]
    pub async fn retry_challenge(&mut self) -> Result<(), GameError> {
        self.guard("retry_challenge", &[GameStatus::AwaitingPaper])?;
        self.load_challenge().await
    }

    /// Score a `YYYY-MM-DD` guess against the active paper
    #[instrument(skip(self))]
    pub async fn submit_guess(&mut self, guess: &str) -> Result<GuessOutcome, GameError> {
        self.guard("submit_guess", &[GameStatus::AwaitingGuess])?;

        let guessed_date = self.validate_guess(guess).map_err(|e| self.fail(e))?;
        let round_index = self.session.current_round();

        let scored = {
            let Some(challenge) = self.session.active_challenge() else {
                return Err(self.fail(GameError::InvalidState {
                    operation: "submit_guess",
                    status: self.session.status(),
                }));
            };
            self.gateway.score_guess(challenge, guessed_date).await
        };

        let scored = match scored {
            Ok(scored) => scored,
            Err(e) => {
                warn!(
                    session_id = %self.session.id(),
                    round = round_index,
                    error = %e,
                    "Failed to score guess"
                );
                return Err(self.fail(GameError::ScoringFailed(e.to_string())));
            }
        };

        let actual_date = PaperDate::parse(&scored.actual_date)
            .map_err(|e| self.fail(GameError::ScoringFailed(e.to_string())))?;

        let outcome = GuessOutcome {
            round_index,
            guessed_date,
            actual_date,
            difference_days: scored.difference_days,
            score: scored.score,
        };

        let from = self.session.status();
        if let Err(e) = self.session.resolve_round(outcome.clone()) {
            return Err(self.fail(e.into()));
        }

        info!(
            session_id = %self.session.id(),
            round = round_index,
            difference_days = outcome.difference_days,
            score = outcome.score,
            running_total = self.session.ledger().total(),
            "Round resolved"
        );

        self.announce_transition(from);
        self.event_bus.emit(GameEvent::RoundResolved {
            session_id: self.session.id(),
            outcome: outcome.clone(),
            running_total: self.session.ledger().total(),
        });

        Ok(outcome)
    }

    /// Move past a resolved round: either to the next paper or to game over
    #[instrument(skip(self))]
    pub async fn advance_round(&mut self) -> Result<RoundAdvance, GameError> {
        self.guard("advance_round", &[GameStatus::RoundResolved])?;

        let from = self.session.status();

        if self.session.current_round() >= self.config.total_rounds {
            self.session.finish();
            let final_total = self.session.ledger().total();

            info!(
                session_id = %self.session.id(),
                final_total,
                rounds = self.session.ledger().len(),
                "Game over"
            );

            self.announce_transition(from);
            self.event_bus.emit(GameEvent::GameOver {
                session_id: self.session.id(),
                final_total,
                rounds: self.session.ledger().entries().to_vec(),
            });
            self.finalize_score()?;

            return Ok(RoundAdvance::GameOver { final_total });
        }

        self.session.begin_next_round();
        let round = self.session.current_round();
        self.announce_transition(from);

        self.load_challenge().await?;
        Ok(RoundAdvance::NextRound { round })
    }

    /// Submit the final total in the background.
    ///
    /// The outcome only ever shows up as events (`ScoreSubmitted`,
    /// `NewHighScore` or an `Error`); the session stays in `GameOver` whatever
    /// happens. A session's total is submitted at most once, so calling this
    /// after `advance_round` ended the game is rejected with `InvalidState`.
    pub fn finalize_score(&mut self) -> Result<(), GameError> {
        self.guard("finalize_score", &[GameStatus::GameOver])?;

        if self.session.score_submitted() {
            warn!(
                session_id = %self.session.id(),
                "Final score already submitted for this session"
            );
            return Err(self.fail(GameError::InvalidState {
                operation: "finalize_score",
                status: self.session.status(),
            }));
        }

        let session_id = self.session.id();
        let total = self.session.ledger().total();

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "No runtime to submit final score on");
                self.report(&GameError::ScoreSubmissionFailed(e.to_string()));
                return Ok(());
            }
        };

        self.session.mark_score_submitted();
        let gateway = Arc::clone(&self.gateway);
        let event_bus = self.event_bus.clone();

        self.pending_submission = Some(runtime.spawn(async move {
            match gateway.submit_final_score(total).await {
                Ok(ack) => {
                    info!(
                        session_id = %session_id,
                        total,
                        message = %ack.message,
                        new_high_score = ack.is_new_high_score,
                        "Final score submitted"
                    );

                    event_bus.emit(GameEvent::ScoreSubmitted {
                        session_id,
                        accepted: ack.accepted,
                        message: ack.message,
                    });
                    if ack.is_new_high_score {
                        event_bus.emit(GameEvent::NewHighScore { session_id, total });
                    }
                }
                Err(e) => {
                    warn!(session_id = %session_id, total, error = %e, "Final score submission failed");
                    let err = GameError::ScoreSubmissionFailed(e.to_string());
                    event_bus.emit(GameEvent::Error {
                        session_id,
                        kind: err.kind(),
                        message: err.to_string(),
                    });
                }
            }
        }));

        Ok(())
    }

    /// Wait for an in-flight final score submission, if any
    pub async fn wait_for_submission(&mut self) {
        if let Some(handle) = self.pending_submission.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Final score submission task did not complete");
            }
        }
    }

    /// Leave a finished game and return to `Idle`
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.guard("restart", &[GameStatus::GameOver])?;

        let from = self.session.status();
        self.session = GameSession::idle(self.clock.today());
        self.announce_transition(from);
        Ok(())
    }

    async fn load_challenge(&mut self) -> Result<(), GameError> {
        let round = self.session.current_round();

        match self.gateway.fetch_challenge().await {
            Ok(challenge) => {
                let abstract_text = challenge.abstract_text.clone();
                let from = self.session.status();
                self.session.present_challenge(challenge);

                debug!(session_id = %self.session.id(), round, "Paper ready");

                self.announce_transition(from);
                self.event_bus.emit(GameEvent::ChallengeReady {
                    session_id: self.session.id(),
                    round,
                    abstract_text,
                });
                Ok(())
            }
            Err(e) => {
                warn!(
                    session_id = %self.session.id(),
                    round,
                    error = %e,
                    "Failed to fetch paper"
                );
                Err(self.fail(GameError::ChallengeUnavailable(e.to_string())))
            }
        }
    }

    fn validate_guess(&self, raw: &str) -> Result<NaiveDate, GameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GameError::InvalidGuess("Please select a date".to_string()));
        }

        let guessed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
            GameError::InvalidGuess(format!("'{trimmed}' is not a YYYY-MM-DD date"))
        })?;

        let floor = self.config.guess_floor;
        if guessed < floor {
            return Err(GameError::InvalidGuess(format!(
                "{guessed} is earlier than {floor}"
            )));
        }

        let ceiling = self.session.started_on();
        if guessed > ceiling {
            return Err(GameError::InvalidGuess(format!(
                "{guessed} is later than {ceiling}"
            )));
        }

        Ok(guessed)
    }

    fn guard(&self, operation: &'static str, allowed: &[GameStatus]) -> Result<(), GameError> {
        let status = self.session.status();
        if allowed.contains(&status) {
            return Ok(());
        }

        warn!(
            session_id = %self.session.id(),
            operation,
            status = %status,
            "Operation rejected in current state"
        );
        Err(self.fail(GameError::InvalidState { operation, status }))
    }

    fn announce_transition(&self, from: GameStatus) {
        let to = self.session.status();
        debug!(session_id = %self.session.id(), from = %from, to = %to, "Status changed");
        self.event_bus.emit(GameEvent::StatusChanged {
            session_id: self.session.id(),
            from,
            to,
        });
    }

    fn report(&self, err: &GameError) {
        self.event_bus.emit(GameEvent::Error {
            session_id: self.session.id(),
            kind: err.kind(),
            message: err.to_string(),
        });
    }

    fn fail(&self, err: GameError) -> GameError {
        self.report(&err);
        err
    }
}

pub struct GameControllerBuilder {
    gateway: Arc<dyn ScoringGateway>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
    event_bus: EventBus,
}

impl GameControllerBuilder {
    fn new(gateway: Arc<dyn ScoringGateway>) -> Self {
        Self {
            gateway,
            clock: Arc::new(SystemClock),
            config: GameConfig::default(),
            event_bus: EventBus::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = event_bus;
        self
    }

    pub fn build(self) -> GameController {
        let session = GameSession::idle(self.clock.today());
        GameController {
            gateway: self.gateway,
            clock: self.clock,
            config: self.config,
            event_bus: self.event_bus,
            session,
            pending_submission: None,
        }
    }
}
