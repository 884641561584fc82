// Round ledger
//
// Append-only history of resolved rounds plus the running total.

pub use errors::LedgerError;
pub use models::GuessOutcome;

mod errors;
mod models;

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct RoundLedger {
    entries: Vec<GuessOutcome>,
    recorded_rounds: HashSet<u32>,
    running_total: u32,
}

impl RoundLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a resolved round.
    ///
    /// The entry and the total are updated together; a rejected append leaves
    /// the ledger untouched.
    pub fn append(&mut self, outcome: GuessOutcome) -> Result<(), LedgerError> {
        if !self.recorded_rounds.insert(outcome.round_index) {
            return Err(LedgerError::DuplicateRound(outcome.round_index));
        }

        self.running_total = self.running_total.saturating_add(outcome.score);
        self.entries.push(outcome);
        Ok(())
    }

    pub fn entries(&self) -> &[GuessOutcome] {
        &self.entries
    }

    pub fn total(&self) -> u32 {
        self.running_total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display-ready lines for the end-of-game view, in round order
    pub fn breakdown(&self) -> Vec<String> {
        self.entries.iter().map(GuessOutcome::summary).collect()
    }
}
