use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use super::events::GameEvent;

/// Errors that can occur when handling events
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Retryable error: {0}")]
    Retryable(String),

    #[error("Non-retryable error: {0}")]
    NonRetryable(String),
}

impl EventError {
    /// Whether this error indicates the operation should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, EventError::Retryable(_))
    }

    pub fn retryable(msg: impl Into<String>) -> Self {
        EventError::Retryable(msg.into())
    }

    pub fn non_retryable(msg: impl Into<String>) -> Self {
        EventError::NonRetryable(msg.into())
    }
}

/// Trait for components that react to game events
///
/// Examples:
/// - a terminal renderer printing abstracts and round results
/// - TracingEventHandler: records every event in the log
#[async_trait]
pub trait GameEventHandler: Send + Sync {
    /// Handle a game event
    ///
    /// Handlers should be idempotent where possible - handling the same
    /// event multiple times should be safe.
    async fn handle(&self, event: &GameEvent) -> Result<(), EventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// Logs every event it sees
pub struct TracingEventHandler;

#[async_trait]
impl GameEventHandler for TracingEventHandler {
    async fn handle(&self, event: &GameEvent) -> Result<(), EventError> {
        match event {
            GameEvent::Error {
                session_id,
                kind,
                message,
            } => {
                warn!(session_id = %session_id, kind = %kind, message = %message, "Game error");
            }
            GameEvent::GameOver {
                session_id,
                final_total,
                rounds,
            } => {
                info!(
                    session_id = %session_id,
                    final_total,
                    rounds = rounds.len(),
                    "Game over"
                );
            }
            other => {
                info!(
                    session_id = %other.session_id(),
                    event_type = other.event_type(),
                    "Game event"
                );
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TracingEventHandler"
    }
}
