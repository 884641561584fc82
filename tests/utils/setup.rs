use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use paperdate::{EventBus, FixedClock, GameConfig, GameController, GameEvent, GameSubscription};

use super::mocks::{EventRecorder, ScriptedGateway};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub controller: GameController,
    pub gateway: ScriptedGateway,
    pub events: broadcast::Receiver<GameEvent>,
    pub recorder: Arc<EventRecorder>,
    pub _subscription_handle: JoinHandle<()>,
}

pub struct TestSetupBuilder {
    today: NaiveDate,
    scores: Vec<u32>,
    papers: Vec<(String, String)>,
    total_rounds: Option<u32>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            today: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            scores: vec![],
            papers: vec![],
            total_rounds: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_scores(mut self, scores: Vec<u32>) -> Self {
        self.scores = scores;
        self
    }

    pub fn with_paper(mut self, abstract_text: &str, date: &str) -> Self {
        self.papers
            .push((abstract_text.to_string(), date.to_string()));
        self
    }

    pub fn with_total_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = Some(total_rounds);
        self
    }

    pub async fn build(self) -> TestSetup {
        let gateway = ScriptedGateway::new();
        for score in &self.scores {
            gateway.push_score(*score).await;
        }
        for (abstract_text, date) in &self.papers {
            gateway.push_paper(abstract_text, date).await;
        }

        let mut config = GameConfig::default();
        if let Some(total_rounds) = self.total_rounds {
            config.total_rounds = total_rounds;
        }

        let event_bus = EventBus::default();
        let recorder = Arc::new(EventRecorder::new());
        let subscription_handle =
            GameSubscription::new(recorder.clone(), event_bus.clone()).start();
        let events = event_bus.subscribe();

        let controller = GameController::builder(Arc::new(gateway.clone()))
            .with_clock(Arc::new(FixedClock(self.today)))
            .with_config(config)
            .with_event_bus(event_bus)
            .build();

        TestSetup {
            controller,
            gateway,
            events,
            recorder,
            _subscription_handle: subscription_handle,
        }
    }
}
