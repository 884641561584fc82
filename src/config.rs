use chrono::NaiveDate;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TOTAL_ROUNDS: u32 = 7;
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Rules of a game session
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub total_rounds: u32,
    /// Earliest date a player may guess
    pub guess_floor: NaiveDate,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            guess_floor: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Settings for talking to the scoring service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub request_timeout: Duration,
    /// Name the final score is recorded under
    pub player: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("PAPERDATE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Self {
            server_url: std::env::var("PAPERDATE_SERVER_URL")
                .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            player: std::env::var("PAPERDATE_PLAYER")
                .ok()
                .filter(|name| !name.trim().is_empty()),
        }
    }
}

/// Settings for the scoring service binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Optional JSON catalogue of papers; the built-in sample set is used otherwise
    pub papers_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("PAPERDATE_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            papers_path: std::env::var("PAPERDATE_PAPERS_PATH").ok().map(PathBuf::from),
        }
    }
}
