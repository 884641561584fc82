use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Round {0} has already been recorded")]
    DuplicateRound(u32),
}
