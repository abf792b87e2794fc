//! Round-robin scheduling by the circle method.
//!
//! Seats are filled in roster order, plus one empty seat when the player
//! count is odd. Seat 0 stays put; every other seat moves one place per
//! round. Each round pairs seat `i` with seat `n - 1 - i`; whoever faces
//! the empty seat gets a bye.
//!
//! The schedule depends only on the roster, never on results.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::rounds::{Match, Round};

/// Fixed pairings for every round.
///
/// ```
/// use tcg_tournament::core::PlayerId;
/// use tcg_tournament::pairing::RoundRobinSchedule;
///
/// let players: Vec<_> = (1..=5).map(PlayerId::new).collect();
/// let schedule = RoundRobinSchedule::generate(&players);
///
/// assert_eq!(schedule.len(), 5);
/// assert!(schedule.rounds().all(|round| round.bye_count() == 1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobinSchedule {
    rounds: Vec<Vec<Match>>,
}

impl RoundRobinSchedule {
    /// Build the schedule for these players, in seating order.
    #[must_use]
    pub fn generate(players: &[PlayerId]) -> Self {
        let mut seats: Vec<Option<PlayerId>> = players.iter().copied().map(Some).collect();
        if seats.len() % 2 == 1 {
            seats.push(None);
        }
        let n = seats.len();

        let mut rounds = Vec::with_capacity(n.saturating_sub(1));
        for _ in 1..n {
            let mut matches = Vec::with_capacity(n / 2);
            let mut bye = None;
            for i in 0..n / 2 {
                match (seats[i], seats[n - 1 - i]) {
                    (Some(a), Some(b)) => matches.push(Match::paired(a, b)),
                    (Some(a), None) | (None, Some(a)) => bye = Some(Match::bye(a)),
                    (None, None) => unreachable!("only one empty seat"),
                }
            }
            matches.extend(bye);
            rounds.push(matches);
            seats[1..].rotate_right(1);
        }

        Self { rounds }
    }

    /// Number of rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// True when fewer than two players were seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Round `number` (1-based) with unset results, if scheduled.
    #[must_use]
    pub fn round(&self, number: u32) -> Option<Round> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.rounds
            .get(index)
            .map(|matches| Round::swiss(number, matches.clone()))
    }

    /// Every scheduled round in order.
    pub fn rounds(&self) -> impl Iterator<Item = Round> + '_ {
        (1..=self.rounds.len() as u32).filter_map(|n| self.round(n))
    }
}
