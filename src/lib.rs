// Library crate for the paper dating game
// This file exposes the public API for the binaries and integration tests

pub mod clock;
pub mod config;
pub mod event;
pub mod formatter;
pub mod game;
pub mod gateway;
pub mod ledger;
pub mod server;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ClientConfig, GameConfig, ServerConfig};
pub use event::{EventBus, GameEvent, GameEventHandler, GameSubscription};
pub use formatter::{format_date, format_difference, DatePrecision, PaperDate};
pub use game::{ErrorKind, GameController, GameError, GameSession, GameStatus, RoundAdvance};
pub use gateway::{
    Challenge, GatewayError, HiddenDate, HttpScoringGateway, ScoredGuess, ScoringGateway,
    SubmissionAck,
};
pub use ledger::{GuessOutcome, LedgerError, RoundLedger};
pub use shared::{AppError, AppState};
