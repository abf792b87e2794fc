//! Match outcomes and scoring values.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Points for a match win (byes included).
pub const WIN_POINTS: u32 = 3;
/// Points for a tie.
pub const TIE_POINTS: u32 = 1;

/// Result of a single match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// No result entered yet.
    #[default]
    Unset,
    /// The named player won.
    Decisive(PlayerId),
    /// Neither player won. Swiss phase only.
    Tie,
    /// Unopposed win for the named player.
    Bye(PlayerId),
}

impl MatchOutcome {
    /// True once a result has been entered.
    #[must_use]
    pub fn is_set(self) -> bool {
        !matches!(self, MatchOutcome::Unset)
    }

    /// The player credited with the win, if any.
    #[must_use]
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            MatchOutcome::Decisive(p) | MatchOutcome::Bye(p) => Some(p),
            MatchOutcome::Unset | MatchOutcome::Tie => None,
        }
    }
}

/// One player's share of a match result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl MatchRecord {
    pub const WIN: Self = Self { wins: 1, losses: 0, ties: 0 };
    pub const LOSS: Self = Self { wins: 0, losses: 1, ties: 0 };
    pub const TIE: Self = Self { wins: 0, losses: 0, ties: 1 };

    /// Match points for this record.
    #[must_use]
    pub fn points(self) -> u32 {
        self.wins * WIN_POINTS + self.ties * TIE_POINTS
    }

    /// Matches counted towards win percentage.
    #[must_use]
    pub fn played(self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

impl std::ops::AddAssign for MatchRecord {
    fn add_assign(&mut self, other: Self) {
        self.wins += other.wins;
        self.losses += other.losses;
        self.ties += other.ties;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_winner() {
        let p = PlayerId::new(1);
        assert_eq!(MatchOutcome::Decisive(p).winner(), Some(p));
        assert_eq!(MatchOutcome::Bye(p).winner(), Some(p));
        assert_eq!(MatchOutcome::Tie.winner(), None);
        assert_eq!(MatchOutcome::Unset.winner(), None);
        assert!(!MatchOutcome::default().is_set());
    }

    #[test]
    fn test_record_points() {
        let mut record = MatchRecord::default();
        record += MatchRecord::WIN;
        record += MatchRecord::WIN;
        record += MatchRecord::TIE;
        record += MatchRecord::LOSS;

        assert_eq!(record.points(), 7);
        assert_eq!(record.played(), 4);
    }
}
