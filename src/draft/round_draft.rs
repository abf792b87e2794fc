//! Buffered result edits for one round.
//!
//! A `RoundDraft` snapshots a round's outcomes and takes edits without
//! touching the committed round. `commit` validates the whole buffer and
//! produces the replacement round; nothing is written unless every outcome
//! is legal.

use crate::core::{TournamentError, TournamentResult};
use crate::rounds::{MatchOutcome, Round};

/// Pending outcomes for the round at `round_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundDraft {
    round_index: usize,
    base: Vec<MatchOutcome>,
    outcomes: Vec<MatchOutcome>,
}

impl RoundDraft {
    /// Snapshot `round`'s current outcomes.
    #[must_use]
    pub fn begin(round_index: usize, round: &Round) -> Self {
        let base = round.outcomes();
        Self {
            round_index,
            outcomes: base.clone(),
            base,
        }
    }

    #[must_use]
    pub fn round_index(&self) -> usize {
        self.round_index
    }

    /// Buffered outcomes in table order.
    #[must_use]
    pub fn outcomes(&self) -> &[MatchOutcome] {
        &self.outcomes
    }

    /// Buffered outcome of one match. Panics if out of range.
    #[must_use]
    pub fn outcome(&self, match_index: usize) -> MatchOutcome {
        self.outcomes[match_index]
    }

    /// Buffer a result. Panics if `match_index` is out of range.
    pub fn set(&mut self, match_index: usize, outcome: MatchOutcome) {
        assert!(
            match_index < self.outcomes.len(),
            "match index {} out of range ({} matches)",
            match_index,
            self.outcomes.len()
        );
        self.outcomes[match_index] = outcome;
    }

    /// True when the buffer differs from the snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.outcomes != self.base
    }

    /// Build the committed form of `round` with the buffered outcomes.
    ///
    /// `round` must be the round this draft was opened on.
    pub fn commit(&self, round: &Round) -> TournamentResult<Round> {
        assert_eq!(
            round.matches.len(),
            self.outcomes.len(),
            "draft does not belong to {}",
            round.label
        );

        let mut committed = round.clone();
        for (i, (m, &outcome)) in committed.matches.iter_mut().zip(&self.outcomes).enumerate() {
            if !m.accepts(outcome, round.phase) {
                return Err(TournamentError::IllegalResultForMatch {
                    round: round.label.clone(),
                    match_number: i + 1,
                });
            }
            m.outcome = outcome;
        }
        Ok(committed)
    }

    /// Throw the buffer away.
    pub fn discard(self) {
        log::debug!("Discarded draft for round index {}", self.round_index);
    }
}
