//! Resistance-style standings.
//!
//! Only complete main-phase rounds count. For each player:
//!
//! - **Record**: wins, losses, ties. A bye is a win.
//! - **Points**: 3 per win, 1 per tie.
//! - **Opp Win %**: mean live win % of every non-bye opponent faced.
//! - **OppOpp Win %**: mean Opp Win % of the same opponents.
//!
//! Live win % is `wins / played`, clamped to 25%..=100%.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, Roster};
use crate::rounds::{MatchRecord, Phase, Round};

/// Lowest live win % used in resistance calculations.
pub const WIN_PCT_FLOOR: f64 = 0.25;
/// Highest live win % used in resistance calculations.
pub const WIN_PCT_CAP: f64 = 1.0;

/// One line of the standings table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    /// 1-based position.
    pub rank: usize,
    pub player: PlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points: u32,
    /// Opponents' win percentage (0.0..=1.0).
    pub opp_win_pct: f64,
    /// Opponents' opponents' win percentage (0.0..=1.0).
    pub opp_opp_win_pct: f64,
}

impl StandingRow {
    /// Total order: points, then Opp Win %, then OppOpp Win % (all
    /// descending), then name ascending. Player id settles anything left.
    #[must_use]
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.opp_win_pct.total_cmp(&self.opp_win_pct))
            .then_with(|| other.opp_opp_win_pct.total_cmp(&self.opp_opp_win_pct))
            .then_with(|| self.name.to_lowercase().cmp(&other.name.to_lowercase()))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.player.cmp(&other.player))
    }
}

/// Per-player tally gathered from the counted matches.
#[derive(Clone, Debug, Default)]
struct Tally {
    record: MatchRecord,
    /// Non-bye opponents, one entry per match (repeats for rematches).
    opponents: SmallVec<[PlayerId; 8]>,
}

/// Ordered standings table.
///
/// ## Example
///
/// ```
/// use tcg_tournament::core::Roster;
/// use tcg_tournament::rounds::{Match, MatchOutcome, Round};
/// use tcg_tournament::standings::Standings;
///
/// let mut roster = Roster::new();
/// let a = roster.add("Ash").unwrap();
/// let b = roster.add("Gary").unwrap();
///
/// let mut round = Round::swiss(1, vec![Match::paired(a, b)]);
/// round.matches[0].outcome = MatchOutcome::Decisive(b);
///
/// let standings = Standings::compute(&roster, [&round]);
/// assert_eq!(standings.seed_order(), vec![b, a]);
/// assert_eq!(standings.get(b).unwrap().points, 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    rows: Vec<StandingRow>,
}

impl Standings {
    /// Compute standings for every rostered player.
    ///
    /// Rounds that are incomplete or belong to the top cut are skipped, so
    /// callers may pass the full round list.
    pub fn compute<'a>(roster: &Roster, rounds: impl IntoIterator<Item = &'a Round>) -> Self {
        let mut tallies: FxHashMap<PlayerId, Tally> = FxHashMap::default();

        for round in rounds {
            if round.phase != Phase::Swiss || !round.is_complete() {
                continue;
            }
            for m in &round.matches {
                for player in m.players() {
                    let tally = tallies.entry(player).or_default();
                    tally.record += m.record_for(player);
                    if let Some(opponent) = m.opponent_of(player) {
                        tally.opponents.push(opponent);
                    }
                }
            }
        }

        let owp: FxHashMap<PlayerId, f64> = tallies
            .iter()
            .map(|(&player, tally)| {
                let pct = mean(tally.opponents.iter().map(|o| live_win_pct(&tallies, *o)));
                (player, pct)
            })
            .collect();

        let mut rows: Vec<StandingRow> = roster
            .iter()
            .map(|player| {
                let tally = tallies.get(&player.id).cloned().unwrap_or_default();
                let opp_opp_win_pct = mean(
                    tally
                        .opponents
                        .iter()
                        .map(|o| owp.get(o).copied().unwrap_or(0.0)),
                );
                StandingRow {
                    rank: 0,
                    player: player.id,
                    name: player.name.clone(),
                    wins: tally.record.wins,
                    losses: tally.record.losses,
                    ties: tally.record.ties,
                    points: tally.record.points(),
                    opp_win_pct: owp.get(&player.id).copied().unwrap_or(0.0),
                    opp_opp_win_pct,
                }
            })
            .collect();

        rows.sort_by(StandingRow::ranking_cmp);
        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i + 1;
        }

        Self { rows }
    }

    /// Rows in rank order.
    #[must_use]
    pub fn rows(&self) -> &[StandingRow] {
        &self.rows
    }

    /// Iterate rows in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &StandingRow> {
        self.rows.iter()
    }

    /// Number of ranked players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True for an empty roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a player.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&StandingRow> {
        self.rows.iter().find(|r| r.player == player)
    }

    /// Points for a player (0 if unranked).
    #[must_use]
    pub fn points_of(&self, player: PlayerId) -> u32 {
        self.get(player).map_or(0, |r| r.points)
    }

    /// Player ids in rank order. Used as pairing and top-cut seed order.
    #[must_use]
    pub fn seed_order(&self) -> Vec<PlayerId> {
        self.rows.iter().map(|r| r.player).collect()
    }
}

/// Live win % for a player, clamped to the floor and cap.
fn live_win_pct(tallies: &FxHashMap<PlayerId, Tally>, player: PlayerId) -> f64 {
    let record = tallies.get(&player).map(|t| t.record).unwrap_or_default();
    let played = record.played().max(1);
    (f64::from(record.wins) / f64::from(played)).clamp(WIN_PCT_FLOOR, WIN_PCT_CAP)
}

/// Arithmetic mean; 0 for no values.
///
/// Values are summed in sorted order so the same multiset always yields the
/// same bits, whatever order the matches were played in.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: SmallVec<[f64; 8]> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let sum: f64 = values.iter().sum();
    sum / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::{Match, MatchOutcome};

    fn roster(names: &[&str]) -> (Roster, Vec<PlayerId>) {
        let mut roster = Roster::new();
        let ids = names.iter().map(|n| roster.add(n).unwrap()).collect();
        (roster, ids)
    }

    fn decided(winner: PlayerId, loser: PlayerId) -> Match {
        let mut m = Match::paired(winner, loser);
        m.outcome = MatchOutcome::Decisive(winner);
        m
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_history() {
        let (roster, ids) = roster(&["Cynthia", "Brock", "Ash"]);
        let standings = Standings::compute(&roster, &Vec::<Round>::new());

        // All zero: alphabetical order
        assert_eq!(standings.seed_order(), vec![ids[2], ids[1], ids[0]]);
        for row in standings.iter() {
            assert_eq!(row.points, 0);
            assert_eq!(row.opp_win_pct, 0.0);
            assert_eq!(row.opp_opp_win_pct, 0.0);
        }
        assert_eq!(standings.rows()[0].rank, 1);
    }

    #[test]
    fn test_points_and_records() {
        let (roster, ids) = roster(&["A", "B", "C", "D", "E"]);
        let (a, b, c, d, e) = (ids[0], ids[1], ids[2], ids[3], ids[4]);

        let mut tie = Match::paired(c, d);
        tie.outcome = MatchOutcome::Tie;
        let round = Round::swiss(1, vec![decided(a, b), tie, Match::bye(e)]);

        let standings = Standings::compute(&roster, [&round]);

        let row_a = standings.get(a).unwrap();
        assert_eq!((row_a.wins, row_a.losses, row_a.ties, row_a.points), (1, 0, 0, 3));
        let row_c = standings.get(c).unwrap();
        assert_eq!((row_c.wins, row_c.losses, row_c.ties, row_c.points), (0, 0, 1, 1));
        let row_e = standings.get(e).unwrap();
        assert_eq!((row_e.wins, row_e.points), (1, 3));
        assert_eq!(standings.points_of(b), 0);
    }

    #[test]
    fn test_byes_excluded_from_resistance() {
        let (roster, ids) = roster(&["A", "B", "C"]);
        let round = Round::swiss(1, vec![decided(ids[0], ids[1]), Match::bye(ids[2])]);
        let standings = Standings::compute(&roster, [&round]);

        // Bye recipient has no real opponents
        let row_c = standings.get(ids[2]).unwrap();
        assert_eq!(row_c.opp_win_pct, 0.0);
        assert_eq!(row_c.opp_opp_win_pct, 0.0);

        // A faced B (0 wins -> floored to 25%)
        assert!(approx(standings.get(ids[0]).unwrap().opp_win_pct, 0.25));
        // B faced A (1 win of 1)
        assert!(approx(standings.get(ids[1]).unwrap().opp_win_pct, 1.0));
    }

    #[test]
    fn test_two_round_resistance() {
        let (roster, ids) = roster(&["A", "B", "C", "D"]);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

        let r1 = Round::swiss(1, vec![decided(a, b), decided(c, d)]);
        let r2 = Round::swiss(2, vec![decided(a, c), decided(b, d)]);
        let standings = Standings::compute(&roster, [&r1, &r2]);

        // Records: A 2-0, B 1-1, C 1-1, D 0-2
        // Live win %: A 1.0, B 0.5, C 0.5, D 0.25 (floored from 0)
        let row_a = standings.get(a).unwrap();
        assert!(approx(row_a.opp_win_pct, 0.5)); // B, C
        let row_d = standings.get(d).unwrap();
        assert!(approx(row_d.opp_win_pct, 0.5)); // C, B
        let row_b = standings.get(b).unwrap();
        assert!(approx(row_b.opp_win_pct, (1.0 + 0.25) / 2.0)); // A, D
        let row_c = standings.get(c).unwrap();
        assert!(approx(row_c.opp_win_pct, (0.25 + 1.0) / 2.0)); // D, A

        // OppOpp for A = mean(OWP(B), OWP(C))
        assert!(approx(row_a.opp_opp_win_pct, 0.625));

        // B and C tie on points and OWP; OOWP equal too, so name decides
        assert_eq!(standings.seed_order(), vec![a, b, c, d]);
    }

    #[test]
    fn test_incomplete_and_top_cut_rounds_ignored() {
        let (roster, ids) = roster(&["A", "B", "C", "D"]);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

        let incomplete = Round::swiss(1, vec![decided(a, b), Match::paired(c, d)]);
        let cut = Round::new(Phase::TopCut, 1, "SF", vec![decided(d, a)]);

        let standings = Standings::compute(&roster, [&incomplete, &cut]);
        assert!(standings.iter().all(|r| r.points == 0));
    }

    #[test]
    fn test_ordering_prefers_points_then_resistance() {
        let (roster, ids) = roster(&["Zed", "Amy", "Bob", "Cat"]);
        let (zed, amy, bob, cat) = (ids[0], ids[1], ids[2], ids[3]);

        // Zed beats Amy, Bob beats Cat; then Amy beats Cat
        let r1 = Round::swiss(1, vec![decided(zed, amy), decided(bob, cat)]);
        let r2 = Round::swiss(2, vec![decided(amy, cat), decided(zed, bob)]);
        let standings = Standings::compute(&roster, [&r1, &r2]);

        // Zed 6, Amy 3, Bob 3, Cat 0
        assert_eq!(standings.seed_order()[0], zed);
        assert_eq!(standings.seed_order()[3], cat);

        // Amy faced Zed (1.0) and Cat (0.25); Bob faced Cat (0.25) and Zed (1.0): equal OWP
        let row_amy = standings.get(amy).unwrap();
        let row_bob = standings.get(bob).unwrap();
        assert!(approx(row_amy.opp_win_pct, row_bob.opp_win_pct));
        assert_eq!(row_amy.rank + 1, row_bob.rank);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let (roster, ids) = roster(&["A", "B", "C", "D"]);
        let r1 = Round::swiss(1, vec![decided(ids[0], ids[1]), decided(ids[2], ids[3])]);

        let first = Standings::compute(&roster, [&r1]);
        let second = Standings::compute(&roster, [&r1]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(std::iter::empty()), 0.0);
        assert!(approx(mean([0.25, 0.75].into_iter()), 0.5));
    }

    #[test]
    fn test_mean_ignores_order() {
        let third = 1.0 / 3.0;
        assert_eq!(
            mean([third, 1.0, 1.0].into_iter()).to_bits(),
            mean([1.0, 1.0, third].into_iter()).to_bits()
        );
    }

    #[test]
    fn test_same_opponents_in_different_order_tie_on_resistance() {
        let (roster, ids) = roster(&["Alpha", "Bravo", "O1", "O2", "O3", "F1", "F2", "F3"]);
        let (alpha, bravo, o1, o2, o3, f1, f2, f3) =
            (ids[0], ids[1], ids[2], ids[3], ids[4], ids[5], ids[6], ids[7]);

        // Alpha meets O1, O2, O3; Bravo meets O2, O3, O1.
        // O1 finishes 1-2, O2 and O3 finish 3-0.
        let r1 = Round::swiss(
            1,
            vec![decided(alpha, o1), decided(o2, bravo), decided(o3, f3), decided(f1, f2)],
        );
        let r2 = Round::swiss(
            2,
            vec![decided(o2, alpha), decided(o3, bravo), decided(o1, f1), decided(f2, f3)],
        );
        let r3 = Round::swiss(
            3,
            vec![decided(o3, alpha), decided(bravo, o1), decided(o2, f2), decided(f1, f3)],
        );
        let standings = Standings::compute(&roster, [&r1, &r2, &r3]);

        let row_alpha = standings.get(alpha).unwrap();
        let row_bravo = standings.get(bravo).unwrap();
        assert_eq!(row_alpha.points, row_bravo.points);
        assert_eq!(row_alpha.opp_win_pct.to_bits(), row_bravo.opp_win_pct.to_bits());
        assert_eq!(row_alpha.opp_opp_win_pct.to_bits(), row_bravo.opp_opp_win_pct.to_bits());

        // Full tie on the numbers: name decides
        assert_eq!(row_alpha.rank + 1, row_bravo.rank);
    }
}
