//! Swiss pairing.
//!
//! One round at a time, from current standings:
//!
//! 1. Group players into point brackets, highest first.
//! 2. Shuffle each bracket with the injected `ShuffleSource`.
//! 3. Concatenate the brackets into one queue.
//! 4. Odd queue: the lowest-ranked player without a previous bye sits out
//!    (falling back to the lowest-ranked player).
//! 5. Walk the queue. Each unpaired player takes the remaining candidate
//!    with the smallest `(is_rematch, points difference, queue position)`.
//!
//! Rematch avoidance is best-effort: a rematch ranks behind every fresh
//! opponent but is still taken when nothing else is left, so every player
//! is always paired.

use rustc_hash::FxHashSet;

use crate::core::{PlayerId, ShuffleSource, TournamentError, TournamentResult};
use crate::rounds::{Match, Phase, Round};
use crate::standings::{StandingRow, Standings};

/// Who has met whom, and who has had a bye.
#[derive(Clone, Debug, Default)]
pub struct PairingHistory {
    /// Unordered pairs, stored smaller id first.
    played: FxHashSet<(PlayerId, PlayerId)>,
    byes: FxHashSet<PlayerId>,
}

impl PairingHistory {
    /// Collect history from main-phase rounds. Top-cut rounds are skipped.
    pub fn from_rounds<'a>(rounds: impl IntoIterator<Item = &'a Round>) -> Self {
        let mut history = Self::default();
        for round in rounds {
            if round.phase != Phase::Swiss {
                continue;
            }
            for m in &round.matches {
                match m.p2 {
                    Some(p2) => {
                        history.played.insert(ordered(m.p1, p2));
                    }
                    None => {
                        history.byes.insert(m.p1);
                    }
                }
            }
        }
        history
    }

    /// True if the two players have already met.
    #[must_use]
    pub fn have_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self.played.contains(&ordered(a, b))
    }

    /// True if the player has already had a bye.
    #[must_use]
    pub fn had_bye(&self, player: PlayerId) -> bool {
        self.byes.contains(&player)
    }
}

fn ordered(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pair the next Swiss round.
///
/// Returns `ScheduleComplete` once `round_number` exceeds `rounds_planned`.
pub fn pair_swiss_round<S: ShuffleSource>(
    standings: &Standings,
    history: &PairingHistory,
    round_number: u32,
    rounds_planned: u32,
    shuffle: &mut S,
) -> TournamentResult<Round> {
    if standings.len() < 2 {
        return Err(TournamentError::InsufficientPlayers {
            have: standings.len(),
        });
    }
    if round_number > rounds_planned {
        return Err(TournamentError::ScheduleComplete);
    }

    let mut queue = bracket_queue(standings.rows(), shuffle);

    let bye = if queue.len() % 2 == 1 {
        choose_bye(standings, history)
    } else {
        None
    };
    if let Some(player) = bye {
        queue.retain(|&p| p != player);
        log::debug!("{} receives the round {} bye", player, round_number);
    }

    // The bye leaves an even queue; each step seats two players
    let mut matches = Vec::with_capacity(queue.len() / 2 + 1);
    let mut unpaired = queue;
    while unpaired.len() >= 2 {
        let p1 = unpaired.remove(0);
        let p2 = unpaired.remove(best_opponent(p1, &unpaired, standings, history));
        if history.have_played(p1, p2) {
            log::debug!("Forced rematch {} vs {} in round {}", p1, p2, round_number);
        } else if standings.points_of(p1) != standings.points_of(p2) {
            log::debug!("Downpair {} vs {} in round {}", p1, p2, round_number);
        }
        matches.push(Match::paired(p1, p2));
    }
    debug_assert!(unpaired.is_empty());

    matches.extend(bye.map(Match::bye));
    Ok(Round::swiss(round_number, matches))
}

/// Point brackets, highest first, each shuffled.
fn bracket_queue<S: ShuffleSource>(rows: &[StandingRow], shuffle: &mut S) -> Vec<PlayerId> {
    let mut queue = Vec::with_capacity(rows.len());
    let mut start = 0;
    while start < rows.len() {
        let points = rows[start].points;
        let end = rows[start..]
            .iter()
            .position(|r| r.points != points)
            .map_or(rows.len(), |offset| start + offset);

        let mut bracket: Vec<PlayerId> = rows[start..end].iter().map(|r| r.player).collect();
        shuffle.shuffle(&mut bracket);
        queue.extend(bracket);
        start = end;
    }
    queue
}

/// Lowest-ranked player without a bye, else the lowest-ranked player.
fn choose_bye(standings: &Standings, history: &PairingHistory) -> Option<PlayerId> {
    let rows = standings.rows();
    rows.iter()
        .rev()
        .find(|r| !history.had_bye(r.player))
        .or_else(|| rows.last())
        .map(|r| r.player)
}

/// Index of the preferred opponent in `candidates`, which must be non-empty.
///
/// Fresh opponents beat rematches, then the closest points total wins, then
/// queue position. Walking down the queue this way is the downpair.
fn best_opponent(
    p1: PlayerId,
    candidates: &[PlayerId],
    standings: &Standings,
    history: &PairingHistory,
) -> usize {
    let p1_points = standings.points_of(p1);
    candidates
        .iter()
        .enumerate()
        .min_by_key(|&(pos, &c)| {
            (
                history.have_played(p1, c),
                p1_points.abs_diff(standings.points_of(c)),
                pos,
            )
        })
        .map_or(0, |(pos, _)| pos)
}
