//! One-draft-at-a-time edit controller.
//!
//! ```text
//! Idle --begin_edit--> Editing(draft) --commit/cancel--> Idle
//! ```
//!
//! Re-opening the round already being edited keeps the buffer. Opening a
//! different round while the buffer is dirty is a `DraftConflict`; the
//! caller decides whether to throw the edits away.

use crate::core::{TournamentError, TournamentResult};
use crate::rounds::{MatchOutcome, Phase};
use crate::tournament::Tournament;

use super::round_draft::RoundDraft;

/// Controller state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DraftState {
    #[default]
    Idle,
    Editing(RoundDraft),
}

/// What a successful commit did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Round that was written.
    pub round_index: usize,
    /// The committed round is a fully decided top-cut stage, so the bracket
    /// can be advanced.
    pub stage_ready: bool,
}

/// Routes result edits through a single `RoundDraft`.
#[derive(Clone, Debug, Default)]
pub struct DraftController {
    state: DraftState,
}

impl DraftController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// The open draft, if any.
    #[must_use]
    pub fn active(&self) -> Option<&RoundDraft> {
        match &self.state {
            DraftState::Editing(draft) => Some(draft),
            DraftState::Idle => None,
        }
    }

    /// True when an open draft holds unsaved edits.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.active().is_some_and(RoundDraft::is_dirty)
    }

    /// Open round `index` for editing.
    pub fn begin_edit(&mut self, tournament: &Tournament, index: usize) -> TournamentResult<()> {
        tournament.check_editable(index)?;
        if let DraftState::Editing(draft) = &self.state {
            if draft.round_index() == index {
                return Ok(());
            }
            if draft.is_dirty() {
                return Err(TournamentError::DraftConflict {
                    dirty_round: tournament.round(draft.round_index()).label.clone(),
                });
            }
        }
        self.state = DraftState::Editing(RoundDraft::begin(index, tournament.round(index)));
        Ok(())
    }

    /// Open round `index`, dropping any open draft first.
    pub fn begin_edit_discarding(&mut self, tournament: &Tournament, index: usize) -> TournamentResult<()> {
        tournament.check_editable(index)?;
        if let DraftState::Editing(draft) = std::mem::take(&mut self.state) {
            draft.discard();
        }
        self.state = DraftState::Editing(RoundDraft::begin(index, tournament.round(index)));
        Ok(())
    }

    /// Buffer a result in the open draft.
    pub fn set_result(&mut self, match_index: usize, outcome: MatchOutcome) -> TournamentResult<()> {
        match &mut self.state {
            DraftState::Editing(draft) => {
                draft.set(match_index, outcome);
                Ok(())
            }
            DraftState::Idle => Err(TournamentError::NoActiveDraft),
        }
    }

    /// Write the open draft into `tournament` and close it.
    ///
    /// On error the draft stays open and the tournament is unchanged.
    pub fn commit(&mut self, tournament: &mut Tournament) -> TournamentResult<CommitReceipt> {
        let draft = self.active().ok_or(TournamentError::NoActiveDraft)?;
        let round_index = draft.round_index();
        let round = draft.commit(tournament.round(round_index))?;
        let stage_ready = round.phase == Phase::TopCut && round.is_complete();

        log::info!("{}: committed results for {}", tournament.name(), round.label);
        tournament.replace_round(round_index, round)?;
        self.state = DraftState::Idle;

        Ok(CommitReceipt {
            round_index,
            stage_ready,
        })
    }

    /// Discard the open draft.
    pub fn cancel(&mut self) -> TournamentResult<()> {
        match std::mem::take(&mut self.state) {
            DraftState::Editing(draft) => {
                draft.discard();
                Ok(())
            }
            DraftState::Idle => Err(TournamentError::NoActiveDraft),
        }
    }
}
