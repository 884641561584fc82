use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use paperdate::event::EventError;
use paperdate::{
    Challenge, GameEvent, GameEventHandler, GatewayError, HiddenDate, PaperDate, ScoredGuess,
    ScoringGateway, SubmissionAck,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Scoring gateway that replays scripted papers and scores and records every call
#[derive(Clone)]
pub struct ScriptedGateway {
    papers: Arc<RwLock<VecDeque<(String, String)>>>,
    scores: Arc<RwLock<VecDeque<u32>>>,
    fail_next_fetch: Arc<RwLock<bool>>,
    submission: Arc<RwLock<Result<SubmissionAck, GatewayError>>>,
    fetch_calls: Arc<RwLock<usize>>,
    guesses: Arc<RwLock<Vec<NaiveDate>>>,
    submitted_totals: Arc<RwLock<Vec<u32>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            papers: Arc::new(RwLock::new(VecDeque::new())),
            scores: Arc::new(RwLock::new(VecDeque::new())),
            fail_next_fetch: Arc::new(RwLock::new(false)),
            submission: Arc::new(RwLock::new(Ok(SubmissionAck::from_message(
                "Score submitted",
            )))),
            fetch_calls: Arc::new(RwLock::new(0)),
            guesses: Arc::new(RwLock::new(Vec::new())),
            submitted_totals: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn push_paper(&self, abstract_text: &str, date: &str) {
        self.papers
            .write()
            .await
            .push_back((abstract_text.to_string(), date.to_string()));
    }

    pub async fn push_score(&self, score: u32) {
        self.scores.write().await.push_back(score);
    }

    pub async fn fail_next_fetch(&self) {
        *self.fail_next_fetch.write().await = true;
    }

    pub async fn set_submission(&self, result: Result<SubmissionAck, GatewayError>) {
        *self.submission.write().await = result;
    }

    pub async fn fetch_calls(&self) -> usize {
        *self.fetch_calls.read().await
    }

    pub async fn guesses(&self) -> Vec<NaiveDate> {
        self.guesses.read().await.clone()
    }

    pub async fn submitted_totals(&self) -> Vec<u32> {
        self.submitted_totals.read().await.clone()
    }
}

#[async_trait]
impl ScoringGateway for ScriptedGateway {
    async fn fetch_challenge(&self) -> Result<Challenge, GatewayError> {
        *self.fetch_calls.write().await += 1;

        let mut fail = self.fail_next_fetch.write().await;
        if *fail {
            *fail = false;
            return Err(GatewayError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        drop(fail);

        let (abstract_text, date) = self
            .papers
            .write()
            .await
            .pop_front()
            .unwrap_or_else(|| ("An abstract".to_string(), "2016-04".to_string()));

        Ok(Challenge::new(abstract_text, HiddenDate::new(date)))
    }

    async fn score_guess(
        &self,
        challenge: &Challenge,
        guessed_date: NaiveDate,
    ) -> Result<ScoredGuess, GatewayError> {
        self.guesses.write().await.push(guessed_date);

        let actual = PaperDate::parse(challenge.hidden_date.reveal())
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        let score = self.scores.write().await.pop_front().unwrap_or(0);

        Ok(ScoredGuess {
            actual_date: actual.to_string(),
            difference_days: (actual.date() - guessed_date).num_days().unsigned_abs() as u32,
            score,
        })
    }

    async fn submit_final_score(&self, total: u32) -> Result<SubmissionAck, GatewayError> {
        self.submitted_totals.write().await.push(total);
        self.submission.read().await.clone()
    }
}

/// Event handler that keeps every event it receives
#[derive(Default)]
pub struct EventRecorder {
    events: RwLock<Vec<GameEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<GameEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl GameEventHandler for EventRecorder {
    async fn handle(&self, event: &GameEvent) -> Result<(), EventError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "EventRecorder"
    }
}
