//! Rounds, matches and their outcomes.

pub mod outcome;
pub mod round;

pub use outcome::{MatchOutcome, MatchRecord, TIE_POINTS, WIN_POINTS};
pub use round::{Match, Phase, Round};
