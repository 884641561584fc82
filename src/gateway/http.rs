use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::messages::{
    CalculateScoreRequest, CalculateScoreResponse, FetchPaperResponse, SubmitScoreRequest,
    SubmitScoreResponse,
};
use super::{Challenge, GatewayError, HiddenDate, ScoredGuess, ScoringGateway, SubmissionAck};
use crate::config::ClientConfig;

/// `ScoringGateway` backed by the scoring service's JSON API
#[derive(Clone)]
pub struct HttpScoringGateway {
    client: Client,
    base_url: String,
    player: Option<String>,
}

impl HttpScoringGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            player: config.player.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Scoring service returned an error");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ScoringGateway for HttpScoringGateway {
    #[instrument(skip(self))]
    async fn fetch_challenge(&self) -> Result<Challenge, GatewayError> {
        let response = self.client.get(self.url("/game/fetch-paper")).send().await?;
        let paper: FetchPaperResponse = Self::decode(response).await?;

        debug!(paper_id = paper.id, "Fetched paper");

        Ok(Challenge::new(paper.abstract_text, HiddenDate::new(paper.date)))
    }

    #[instrument(skip(self, challenge))]
    async fn score_guess(
        &self,
        challenge: &Challenge,
        guessed_date: NaiveDate,
    ) -> Result<ScoredGuess, GatewayError> {
        let request = CalculateScoreRequest {
            actual_date: challenge.hidden_date.reveal().to_string(),
            guess_date: guessed_date.format("%Y-%m-%d").to_string(),
        };

        let response = self
            .client
            .post(self.url("/game/calculate-score"))
            .json(&request)
            .send()
            .await?;
        let scored: CalculateScoreResponse = Self::decode(response).await?;

        debug!(
            difference_days = scored.difference_days,
            score = scored.score,
            "Guess scored"
        );

        Ok(ScoredGuess {
            actual_date: scored.actual_date,
            difference_days: scored.difference_days,
            score: scored.score,
        })
    }

    #[instrument(skip(self))]
    async fn submit_final_score(&self, total: u32) -> Result<SubmissionAck, GatewayError> {
        let request = SubmitScoreRequest {
            score: total,
            player: self.player.clone(),
        };

        let response = self
            .client
            .post(self.url("/game/submit-score"))
            .json(&request)
            .send()
            .await?;
        let ack: SubmitScoreResponse = Self::decode(response).await?;

        debug!(message = %ack.message, "Final score submitted");

        Ok(SubmissionAck::from_message(ack.message))
    }
}
