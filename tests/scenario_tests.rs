//! End-to-end tournament scenarios.
//!
//! These drive whole events through the public API: roster, rounds,
//! draft/commit, top cut, persistence and backup.

use tcg_tournament::core::{CutSize, PairingRng, PlayerId, ShuffleSource, TournamentConfig};
use tcg_tournament::rounds::{MatchOutcome, Phase};
use tcg_tournament::session::Session;
use tcg_tournament::store::{export_json, import_json, list, FileStore, MemoryStore, TournamentFilter, TournamentStore};
use tcg_tournament::topcut::BracketState;
use tcg_tournament::{TournamentError, TournamentResult};

/// Keeps standings order inside every point bracket.
struct NoShuffle;

impl ShuffleSource for NoShuffle {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

fn id_of<S: TournamentStore, R: ShuffleSource, N: tcg_tournament::Notifier>(
    session: &Session<S, R, N>,
    name: &str,
) -> PlayerId {
    session.tournament().roster().find_by_name(name).unwrap().id
}

/// Commit the open draft with a winner chosen per match.
fn commit_winners<S, R, N>(
    session: &mut Session<S, R, N>,
    pick: impl Fn(PlayerId, PlayerId) -> PlayerId,
) -> TournamentResult<()>
where
    S: TournamentStore,
    R: ShuffleSource,
    N: tcg_tournament::Notifier,
{
    let index = session.drafts().active().expect("a draft is open").round_index();
    let matches = session.tournament().round(index).matches.clone();
    for (i, m) in matches.iter().enumerate() {
        if let Some(p2) = m.p2 {
            session.set_result(i, MatchOutcome::Decisive(pick(m.p1, p2)))?;
        }
    }
    session.commit().map(|_| ())
}

/// 5 players, one round: two winners and the bye on 3 points, two losers on 0.
#[test]
fn test_five_player_single_round() {
    let config = TournamentConfig::default().with_rounds(1);
    let mut s = Session::create(config, MemoryStore::new(), NoShuffle);
    for name in ["A", "B", "C", "D", "E"] {
        s.add_player(name).unwrap();
    }
    let (a, b, c, d, e) = (id_of(&s, "A"), id_of(&s, "B"), id_of(&s, "C"), id_of(&s, "D"), id_of(&s, "E"));

    let index = s.next_round().unwrap();
    let round = s.tournament().round(index).clone();
    assert_eq!(round.matches.len(), 3);
    assert_eq!(round.bye_count(), 1);

    // Everyone is on 0, so the bye goes to the last name and the rest pair
    // in standings order.
    let pairs: Vec<_> = round.matches.iter().map(|m| (m.p1, m.p2)).collect();
    assert_eq!(pairs, vec![(a, Some(b)), (c, Some(d)), (e, None)]);

    s.set_result(0, MatchOutcome::Decisive(a)).unwrap();
    s.set_result(1, MatchOutcome::Decisive(c)).unwrap();
    s.commit().unwrap();

    let standings = s.standings();
    let order: Vec<_> = standings.iter().map(|r| r.player).collect();
    assert_eq!(order, vec![a, c, e, b, d]);

    for winner in [a, c] {
        let row = standings.get(winner).unwrap();
        assert_eq!((row.wins, row.losses, row.points), (1, 0, 3));
        assert!((row.opp_win_pct - 0.25).abs() < 1e-9);
        assert!((row.opp_opp_win_pct - 1.0).abs() < 1e-9);
    }

    let bye = standings.get(e).unwrap();
    assert_eq!((bye.wins, bye.points), (1, 3));
    assert_eq!(bye.opp_win_pct, 0.0);
    assert_eq!(bye.opp_opp_win_pct, 0.0);

    for loser in [b, d] {
        let row = standings.get(loser).unwrap();
        assert_eq!((row.losses, row.points), (1, 0));
        assert!((row.opp_win_pct - 1.0).abs() < 1e-9);
        assert!((row.opp_opp_win_pct - 0.25).abs() < 1e-9);
    }

    assert_eq!(s.next_round(), Err(TournamentError::ScheduleComplete));
}

/// Top 8 seeding, then winners re-paired in slot order without re-seeding.
#[test]
fn test_top_cut_eight() {
    let config = TournamentConfig::default()
        .with_rounds(3)
        .with_top_cut(CutSize::Top8);
    let mut s = Session::create(config, MemoryStore::new(), PairingRng::new(2024));
    for i in 1..=12 {
        s.add_player(&format!("Player {:02}", i)).unwrap();
    }

    for _ in 0..3 {
        s.next_round().unwrap();
        // Lower id always wins, so standings follow ids closely
        commit_winners(&mut s, |p1, p2| p1.min(p2)).unwrap();
    }

    let seeds = s.standings().seed_order();
    let qf = s.start_top_cut().unwrap();
    let round = s.tournament().round(qf).clone();
    assert_eq!(round.phase, Phase::TopCut);
    assert_eq!(round.label, "QF");
    let pairs: Vec<_> = round.matches.iter().map(|m| (m.p1, m.p2.unwrap())).collect();
    assert_eq!(
        pairs,
        vec![(seeds[0], seeds[7]), (seeds[1], seeds[6]), (seeds[2], seeds[5]), (seeds[3], seeds[4])]
    );

    // Seeds 1, 7, 6 and 5 win
    let winners = [seeds[0], seeds[6], seeds[5], seeds[4]];
    commit_winners(&mut s, |p1, p2| if winners.contains(&p1) { p1 } else { p2 }).unwrap();

    // Advancing is explicit
    assert_eq!(s.bracket_state(), BracketState::StageInProgress { players: 8 });
    let sf = s.advance_stage().unwrap().unwrap();
    let round = s.tournament().round(sf).clone();
    assert_eq!(round.label, "SF");
    let pairs: Vec<_> = round.matches.iter().map(|m| (m.p1, m.p2.unwrap())).collect();
    assert_eq!(pairs, vec![(seeds[0], seeds[4]), (seeds[6], seeds[5])]);

    commit_winners(&mut s, |p1, _| p1).unwrap();
    let f = s.advance_stage().unwrap().unwrap();
    assert_eq!(s.tournament().round(f).label, "F");

    commit_winners(&mut s, |_, p2| p2).unwrap();
    assert_eq!(s.advance_stage(), Ok(None));
    assert_eq!(s.bracket_state(), BracketState::Finished { champion: seeds[6] });
    assert_eq!(s.tournament().champion(), Some(seeds[6]));

    // Top-cut results never touch standings
    assert_eq!(s.standings().seed_order(), seeds);

    s.finalize().unwrap();
    assert_eq!(s.next_round(), Err(TournamentError::TournamentFinalized));
}

#[test]
fn test_top_cut_larger_than_field() {
    let config = TournamentConfig::default()
        .with_rounds(1)
        .with_top_cut(CutSize::Top8);
    let mut s = Session::create(config, MemoryStore::new(), PairingRng::new(1)).with_notifier(Vec::new());
    for name in ["A", "B", "C", "D", "E"] {
        s.add_player(name).unwrap();
    }
    s.next_round().unwrap();
    commit_winners(&mut s, |p1, _| p1).unwrap();

    let err = s.start_top_cut().unwrap_err();
    assert_eq!(err, TournamentError::InsufficientPlayersForCut { size: 8, have: 5 });
    assert_eq!(s.notifier().last().unwrap(), &err.to_string());
    assert_eq!(s.bracket_state(), BracketState::NotStarted);
}

#[test]
fn test_round_robin_event() {
    let config = TournamentConfig::default().round_robin();
    let mut s = Session::create(config, MemoryStore::new(), PairingRng::new(3));
    for name in ["Ash", "Misty", "Brock", "Gary", "Erika"] {
        s.add_player(name).unwrap();
    }
    let schedule = s.round_robin_schedule();
    assert_eq!(schedule.len(), 5);

    for number in 1..=5 {
        let index = s.next_round().unwrap();
        assert_eq!(s.tournament().round(index).matches, schedule.round(number).unwrap().matches);
        commit_winners(&mut s, |p1, _| p1).unwrap();
    }
    assert_eq!(s.next_round(), Err(TournamentError::ScheduleComplete));

    // Everyone played four matches and had one bye
    for row in s.standings().iter() {
        assert_eq!(row.wins + row.losses + row.ties, 5);
    }
    assert_eq!(s.add_player("Late"), Err(TournamentError::RosterLockedAfterRoundsStarted));
}

#[test]
fn test_file_store_session_and_backup() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("events")).unwrap();

    let config = TournamentConfig::default().with_name("League Cup").with_rounds(2);
    let mut s = Session::create(config, store, PairingRng::new(8));
    for name in ["A", "B", "C", "D"] {
        s.add_player(name).unwrap();
    }
    s.next_round().unwrap();
    commit_winners(&mut s, |p1, _| p1).unwrap();
    let id = s.tournament().id();
    let saved = s.tournament().clone();

    // Reopen from disk
    let store = s.into_store();
    let mut s = Session::open(id, store, PairingRng::new(9)).unwrap().unwrap();
    assert_eq!(s.tournament(), &saved);
    s.next_round().unwrap();

    // Back up into a fresh in-memory store
    let json = export_json(s.store()).unwrap();
    let mut other = MemoryStore::new();
    let summary = import_json(&mut other, &json).unwrap();
    assert_eq!(summary.imported, 1);

    let rows = list(&other, &TournamentFilter::default().with_query("league")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].players, 4);
    assert_eq!(rows[0].progress.generated, 2);
    assert_eq!(rows[0].progress.counted, 1);
}

#[test]
fn test_locked_rounds_reject_edits() {
    let config = TournamentConfig::default()
        .with_rounds(1)
        .with_top_cut(CutSize::Top2);
    let mut s = Session::create(config, MemoryStore::new(), PairingRng::new(4)).with_notifier(Vec::new());
    s.add_player("A").unwrap();
    s.add_player("B").unwrap();
    s.next_round().unwrap();
    commit_winners(&mut s, |p1, _| p1).unwrap();
    s.start_top_cut().unwrap();

    assert_eq!(
        s.begin_edit(0),
        Err(TournamentError::RoundLocked { round: "Round 1".into() })
    );
    assert_eq!(s.notifier().last().unwrap(), "Round 1 can no longer be edited");
}
