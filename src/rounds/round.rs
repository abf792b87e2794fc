//! Matches and rounds.
//!
//! A `Match` pairs two players, or gives one player a bye. A `Round` is an
//! ordered list of matches in one phase; it is complete once every match
//! has a result.

use serde::{Deserialize, Serialize};

use super::outcome::{MatchOutcome, MatchRecord};
use crate::core::PlayerId;

/// Tournament phase a round belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Main phase: Swiss or round-robin rounds. Feeds standings.
    Swiss,
    /// Single-elimination bracket. Never feeds standings.
    TopCut,
}

/// A single pairing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// First seat. Always present.
    pub p1: PlayerId,

    /// Second seat. `None` for a bye.
    pub p2: Option<PlayerId>,

    /// Current result.
    pub outcome: MatchOutcome,
}

impl Match {
    /// Pair two players with no result yet.
    #[must_use]
    pub fn paired(p1: PlayerId, p2: PlayerId) -> Self {
        assert_ne!(p1, p2, "a player cannot be paired with themselves");
        Self {
            p1,
            p2: Some(p2),
            outcome: MatchOutcome::Unset,
        }
    }

    /// Give a player a bye. Byes are complete on creation.
    #[must_use]
    pub fn bye(p1: PlayerId) -> Self {
        Self {
            p1,
            p2: None,
            outcome: MatchOutcome::Bye(p1),
        }
    }

    /// True for an unopposed match.
    #[must_use]
    pub fn is_bye(&self) -> bool {
        self.p2.is_none()
    }

    /// True once the match has a result.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome.is_set()
    }

    /// Check whether a player sits in this match.
    #[must_use]
    pub fn involves(&self, player: PlayerId) -> bool {
        self.p1 == player || self.p2 == Some(player)
    }

    /// Seated players (one for a bye).
    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        std::iter::once(self.p1).chain(self.p2)
    }

    /// The other player in a non-bye match.
    #[must_use]
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        match self.p2 {
            Some(p2) if self.p1 == player => Some(p2),
            Some(p2) if p2 == player => Some(self.p1),
            _ => None,
        }
    }

    /// Check whether two players met here.
    #[must_use]
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        self.opponent_of(a) == Some(b)
    }

    /// Whether `outcome` may be recorded on this match in `phase`.
    ///
    /// - A bye only ever carries `Bye(p1)`.
    /// - A decisive result must name one of the seated players.
    /// - Ties are Swiss-only.
    #[must_use]
    pub fn accepts(&self, outcome: MatchOutcome, phase: Phase) -> bool {
        if self.is_bye() {
            return outcome == MatchOutcome::Bye(self.p1);
        }
        match outcome {
            MatchOutcome::Unset => true,
            MatchOutcome::Decisive(winner) => self.involves(winner),
            MatchOutcome::Tie => phase == Phase::Swiss,
            MatchOutcome::Bye(_) => false,
        }
    }

    /// A player's share of this match's result. Empty if they are not in it
    /// or no result is set.
    #[must_use]
    pub fn record_for(&self, player: PlayerId) -> MatchRecord {
        if !self.involves(player) {
            return MatchRecord::default();
        }
        match self.outcome {
            MatchOutcome::Unset => MatchRecord::default(),
            MatchOutcome::Tie => MatchRecord::TIE,
            MatchOutcome::Decisive(winner) | MatchOutcome::Bye(winner) => {
                if winner == player {
                    MatchRecord::WIN
                } else {
                    MatchRecord::LOSS
                }
            }
        }
    }

    /// Match points earned by a player here.
    #[must_use]
    pub fn points_for(&self, player: PlayerId) -> u32 {
        self.record_for(player).points()
    }
}

/// One round of matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Phase this round belongs to.
    pub phase: Phase,

    /// 1-based number within the phase.
    pub number: u32,

    /// Display label ("Round 3", "SF").
    pub label: String,

    /// Matches in table order.
    pub matches: Vec<Match>,
}

impl Round {
    /// Create a round. Panics if a player is seated twice.
    #[must_use]
    pub fn new(phase: Phase, number: u32, label: impl Into<String>, matches: Vec<Match>) -> Self {
        let round = Self {
            phase,
            number,
            label: label.into(),
            matches,
        };
        round.assert_seating();
        round
    }

    /// Create a main-phase round labelled "Round N".
    #[must_use]
    pub fn swiss(number: u32, matches: Vec<Match>) -> Self {
        Self::new(Phase::Swiss, number, format!("Round {}", number), matches)
    }

    /// True once every match has a result.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_complete)
    }

    /// Every seated player, in table order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.matches.iter().flat_map(Match::players)
    }

    /// Number of bye matches.
    #[must_use]
    pub fn bye_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_bye()).count()
    }

    /// Current outcomes in table order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<MatchOutcome> {
        self.matches.iter().map(|m| m.outcome).collect()
    }

    /// Winners of decided matches, in table order.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        self.matches
            .iter()
            .filter_map(|m| m.outcome.winner())
            .collect()
    }

    fn assert_seating(&self) {
        let mut seen = rustc_hash::FxHashSet::default();
        for player in self.players() {
            assert!(seen.insert(player), "{} is seated twice in {}", player, self.label);
        }
        assert!(self.bye_count() <= 1, "{} has more than one bye", self.label);
    }
}
