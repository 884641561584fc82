use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::models::{LeaderboardEntry, Paper};
use crate::shared::AppError;

/// Source of papers to quiz the player on
#[async_trait]
pub trait PaperRepository: Send + Sync {
    async fn random_paper(&self) -> Result<Option<Paper>, AppError>;
    async fn count(&self) -> Result<usize, AppError>;
}

/// In-memory paper catalogue
#[derive(Debug, Default)]
pub struct InMemoryPaperRepository {
    papers: RwLock<Vec<Paper>>,
}

impl InMemoryPaperRepository {
    pub fn new(papers: Vec<Paper>) -> Self {
        Self {
            papers: RwLock::new(papers),
        }
    }

    /// Loads a JSON array of `{ id, abstract, date }` objects
    #[instrument]
    pub async fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::StorageError(format!("{}: {}", path.display(), e)))?;
        let papers: Vec<Paper> = serde_json::from_str(&raw)
            .map_err(|e| AppError::StorageError(format!("{}: {}", path.display(), e)))?;

        info!(count = papers.len(), "Loaded paper catalogue");
        Ok(Self::new(papers))
    }

    /// A small built-in catalogue for local play
    pub fn with_sample_papers() -> Self {
        let sample = [
            (
                "We introduce a convolutional architecture that reuses feature maps across \
                 layers through identity shortcuts, allowing networks with over a hundred \
                 layers to be trained without degradation in accuracy.",
                "2015-12",
            ),
            (
                "We propose a sequence transduction model based solely on attention, dispensing \
                 with recurrence and convolutions entirely, and show that it trains \
                 significantly faster while reaching a new state of the art in translation.",
                "2017-06-12",
            ),
            (
                "A bidirectional encoder is pre-trained on unlabeled text with a masked token \
                 objective and then fine-tuned with a single additional output layer for a \
                 wide range of language understanding tasks.",
                "2018-10-11",
            ),
            (
                "We present a generative framework in which two networks are trained \
                 simultaneously: one captures the data distribution and the other estimates \
                 the probability that a sample came from the training data.",
                "2014-06",
            ),
            (
                "We describe a method for learning continuous vector representations of words \
                 from very large corpora and show that simple vector arithmetic captures \
                 syntactic and semantic regularities.",
                "2013-01-16",
            ),
            (
                "A protein structure prediction system combining evolutionary information with \
                 a novel attention-based network reaches accuracy competitive with \
                 experimental methods in a blind assessment.",
                "2021-07",
            ),
            (
                "We show that scaling up language models greatly improves task-agnostic \
                 few-shot performance, sometimes reaching competitiveness with prior \
                 fine-tuning approaches.",
                "2020-05-28",
            ),
            (
                "We introduce an optimizer for stochastic objectives based on adaptive \
                 estimates of lower-order moments that is straightforward to implement and \
                 computationally efficient.",
                "2014-12-22",
            ),
        ];

        let papers = sample
            .iter()
            .enumerate()
            .map(|(index, (abstract_text, date))| Paper {
                id: index as u32 + 1,
                abstract_text: abstract_text.to_string(),
                date: date.to_string(),
            })
            .collect();

        Self::new(papers)
    }
}

#[async_trait]
impl PaperRepository for InMemoryPaperRepository {
    async fn random_paper(&self) -> Result<Option<Paper>, AppError> {
        let papers = self.papers.read().await;
        if papers.is_empty() {
            debug!("Paper catalogue is empty");
            return Ok(None);
        }

        let index = rand::rng().random_range(0..papers.len());
        Ok(papers.get(index).cloned())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.papers.read().await.len())
    }
}

/// Per-player best totals
#[async_trait]
pub trait HighScoreRepository: Send + Sync {
    /// Records a total, returning true when it beats the player's previous best
    async fn record_score(&self, player: &str, score: u32) -> Result<bool, AppError>;
    async fn high_score(&self, player: &str) -> Result<Option<u32>, AppError>;
    /// Best totals, highest first; ties are ordered by player name
    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, AppError>;
}

#[derive(Debug, Default)]
pub struct InMemoryHighScoreRepository {
    scores: RwLock<HashMap<String, u32>>,
}

impl InMemoryHighScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HighScoreRepository for InMemoryHighScoreRepository {
    #[instrument(skip(self))]
    async fn record_score(&self, player: &str, score: u32) -> Result<bool, AppError> {
        let mut scores = self.scores.write().await;
        let current = scores.get(player).copied().unwrap_or(0);

        if score > current {
            scores.insert(player.to_string(), score);
            debug!(player, score, previous = current, "New high score recorded");
            return Ok(true);
        }

        Ok(false)
    }

    async fn high_score(&self, player: &str) -> Result<Option<u32>, AppError> {
        Ok(self.scores.read().await.get(player).copied())
    }

    async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, AppError> {
        let scores = self.scores.read().await;
        let mut entries: Vec<LeaderboardEntry> = scores
            .iter()
            .map(|(player, score)| LeaderboardEntry {
                player: player.clone(),
                high_score: *score,
            })
            .collect();

        entries.sort_by(|a, b| {
            b.high_score
                .cmp(&a.high_score)
                .then_with(|| a.player.cmp(&b.player))
        });
        entries.truncate(limit);
        Ok(entries)
    }
}
