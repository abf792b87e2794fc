//! Domain error taxonomy.
//!
//! Every public operation returns either a value or one of these kinds.
//! All of them are recoverable, user-correctable conditions; the `Display`
//! text is the notification shown to the organizer. Contract violations
//! (unknown player ids, out-of-range indices) panic instead.

use thiserror::Error;

use super::ids::PlayerId;

/// Result alias for tournament operations.
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Rejected tournament operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error("At least 2 players are needed (have {have})")]
    InsufficientPlayers { have: usize },

    /// Terminal signal: every planned round has already been generated.
    #[error("All rounds already generated")]
    ScheduleComplete,

    #[error("Finish entering results for the current top-cut stage first")]
    StageNotComplete,

    #[error("A top cut of {size} needs at least {size} players (have {have})")]
    InsufficientPlayersForCut { size: usize, have: usize },

    #[error("Players cannot be added or removed once rounds have started")]
    RosterLockedAfterRoundsStarted,

    #[error("Illegal result for match {match_number} of {round}")]
    IllegalResultForMatch { round: String, match_number: usize },

    #[error("{dirty_round} has unsaved edits; discard them first")]
    DraftConflict { dirty_round: String },

    #[error("Finish entering results for the current round first")]
    RoundNotComplete,

    #[error("The pairing phase is not complete yet")]
    PhaseNotComplete,

    #[error("No top cut is configured for this tournament")]
    NoTopCut,

    #[error("The top cut has already started")]
    TopCutAlreadyStarted,

    #[error("The top cut has not started")]
    TopCutNotStarted,

    #[error("The top cut is already decided")]
    BracketFinished,

    #[error("The tournament is finalized")]
    TournamentFinalized,

    #[error("{round} can no longer be edited")]
    RoundLocked { round: String },

    #[error("No round is being edited")]
    NoActiveDraft,

    #[error("Player name cannot be empty")]
    EmptyPlayerName,

    #[error("A player named \"{name}\" already exists ({existing})")]
    DuplicatePlayerName { name: String, existing: PlayerId },
}

impl TournamentError {
    /// Terminal signals end a phase rather than report a mistake.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TournamentError::ScheduleComplete)
    }
}
