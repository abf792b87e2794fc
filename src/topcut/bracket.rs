//! Single-elimination top cut.
//!
//! Seeds come from final standings. Seed `i` plays seed `size - 1 - i`
//! (1 vs last, 2 vs second-to-last). Winners keep their table order and
//! are re-paired with the same rule; the bracket is never re-seeded.
//!
//! ```text
//! NotStarted -> StageInProgress(8) -> StageInProgress(4) -> StageInProgress(2) -> Finished
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{CutSize, PlayerId, TournamentError, TournamentResult};
use crate::rounds::{Match, Phase, Round};

/// Where the bracket stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BracketState {
    /// No top-cut round exists yet.
    NotStarted,
    /// A stage with `players` entrants is being played.
    StageInProgress { players: usize },
    /// One player left.
    Finished { champion: PlayerId },
}

/// Display label for a stage with `players` entrants.
#[must_use]
pub fn stage_label(players: usize) -> String {
    match players {
        2 => "F".to_string(),
        4 => "SF".to_string(),
        8 => "QF".to_string(),
        n => format!("Top {}", n),
    }
}

/// Pair entrants first vs last, second vs second-to-last, and so on.
#[must_use]
pub fn fold_pairings(entrants: &[PlayerId]) -> Vec<Match> {
    assert!(entrants.len() % 2 == 0, "bracket stages need an even entrant count");
    let last = entrants.len().saturating_sub(1);
    (0..entrants.len() / 2)
        .map(|i| Match::paired(entrants[i], entrants[last - i]))
        .collect()
}

/// First bracket round from the seed order.
///
/// `seeds` is the full standings order; only the top `size` are used.
pub fn seed_bracket(seeds: &[PlayerId], size: CutSize) -> TournamentResult<Round> {
    let players = size.players();
    if seeds.len() < players {
        return Err(TournamentError::InsufficientPlayersForCut {
            size: players,
            have: seeds.len(),
        });
    }
    let matches = fold_pairings(&seeds[..players]);
    Ok(Round::new(Phase::TopCut, 1, stage_label(players), matches))
}

/// Stage outcome after a complete bracket round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageAdvance {
    /// Winners re-paired into the next stage.
    Next(Round),
    /// Only one player left.
    Champion(PlayerId),
}

/// Build the stage after `current`.
///
/// Fails with `StageNotComplete` unless every match has a winner.
pub fn advance(current: &Round) -> TournamentResult<StageAdvance> {
    debug_assert_eq!(current.phase, Phase::TopCut);
    if !current.matches.iter().all(|m| m.outcome.winner().is_some()) {
        return Err(TournamentError::StageNotComplete);
    }

    let winners = current.winners();
    match winners.as_slice() {
        [] => Err(TournamentError::StageNotComplete),
        [champion] => Ok(StageAdvance::Champion(*champion)),
        _ => Ok(StageAdvance::Next(Round::new(
            Phase::TopCut,
            current.number + 1,
            stage_label(winners.len()),
            fold_pairings(&winners),
        ))),
    }
}
