//! The tournament aggregate.
//!
//! ## Lifecycle
//!
//! ```text
//! created -> players added -> main rounds (draft -> commit, one at a time)
//!         -> top cut started -> stages advanced -> champion -> finalized
//! ```
//!
//! Every operation here is all-or-nothing: a rejected call returns an error
//! and leaves the aggregate untouched.
//!
//! ## Rounds
//!
//! Rounds live in an `im::Vector` so that a session can snapshot the whole
//! aggregate before a mutation without copying every match.
//!
//! ## Locking
//!
//! - Players can be added or removed only while no round exists.
//! - Main-phase rounds are editable until the top cut starts.
//! - Only the newest top-cut stage is editable, and only until the champion
//!   is known.
//! - Finalization locks everything except names and deck lists.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};

use super::progress::RoundProgress;
use crate::core::{
    CutSize, EventKind, Format, PairingMode, Player, PlayerId, Roster, ShuffleSource,
    TournamentConfig, TournamentError, TournamentId, TournamentResult,
};
use crate::pairing::{pair_swiss_round, PairingHistory, RoundRobinSchedule};
use crate::rounds::{Phase, Round};
use crate::standings::Standings;
use crate::topcut::{self, BracketState, StageAdvance};

/// One tournament: settings, roster, rounds and bracket state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    id: TournamentId,
    config: TournamentConfig,
    roster: Roster,
    rounds: Vector<Round>,

    /// Cached round-robin pairings. Dropped on any roster change.
    schedule: Option<RoundRobinSchedule>,

    top_cut_started: bool,
    champion: Option<PlayerId>,
    finalized: bool,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty tournament with a fresh id.
    #[must_use]
    pub fn new(config: TournamentConfig) -> Self {
        let now = Utc::now();
        Self {
            id: TournamentId::generate(),
            config,
            roster: Roster::new(),
            rounds: Vector::new(),
            schedule: None,
            top_cut_started: false,
            champion: None,
            finalized: false,
            created_at: now,
            updated_at: now,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> TournamentId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// All rounds, main phase first, in play order.
    #[must_use]
    pub fn rounds(&self) -> &Vector<Round> {
        &self.rounds
    }

    /// Round at `index`. Panics if out of range.
    #[must_use]
    pub fn round(&self, index: usize) -> &Round {
        match self.rounds.get(index) {
            Some(round) => round,
            None => panic!("round index {} out of range ({} rounds)", index, self.rounds.len()),
        }
    }

    /// Main-phase rounds in order.
    pub fn main_rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter().filter(|r| r.phase == Phase::Swiss)
    }

    /// Top-cut rounds in order.
    pub fn top_cut_rounds(&self) -> impl Iterator<Item = &Round> {
        self.rounds.iter().filter(|r| r.phase == Phase::TopCut)
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[must_use]
    pub fn is_top_cut_started(&self) -> bool {
        self.top_cut_started
    }

    /// Bracket winner, once the last stage has been advanced.
    #[must_use]
    pub fn champion(&self) -> Option<PlayerId> {
        self.champion
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Stamp `updated_at` with the current time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub(crate) fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    pub(crate) fn reassign_id(&mut self, id: TournamentId) {
        self.id = id;
    }

    // === Settings ===

    /// Rename the tournament. Allowed at any time.
    pub fn rename(&mut self, name: &str) {
        self.config = std::mem::take(&mut self.config).with_name(name);
        self.touch();
    }

    pub fn set_format(&mut self, format: Format) -> TournamentResult<()> {
        self.ensure_open()?;
        self.config.format = format;
        self.touch();
        Ok(())
    }

    pub fn set_kind(&mut self, kind: EventKind) -> TournamentResult<()> {
        self.ensure_open()?;
        self.config.kind = kind;
        self.touch();
        Ok(())
    }

    /// Change the number of Swiss rounds.
    ///
    /// Never drops below the rounds already generated. Rejected once the
    /// top cut has started.
    pub fn set_rounds_planned(&mut self, rounds: u32) -> TournamentResult<()> {
        self.ensure_open()?;
        if self.top_cut_started {
            return Err(TournamentError::TopCutAlreadyStarted);
        }
        self.config.rounds_planned = rounds.max(self.main_round_count()).max(1);
        self.touch();
        Ok(())
    }

    /// Configure or remove the top cut. Rejected once it has started.
    pub fn set_top_cut(&mut self, size: Option<CutSize>) -> TournamentResult<()> {
        self.ensure_open()?;
        if self.top_cut_started {
            return Err(TournamentError::TopCutAlreadyStarted);
        }
        self.config.top_cut = size;
        self.touch();
        Ok(())
    }

    // === Roster ===

    /// Register a player. Only before the first round.
    pub fn add_player(&mut self, name: &str) -> TournamentResult<PlayerId> {
        self.ensure_roster_open()?;
        let id = self.roster.add(name)?;
        self.schedule = None;
        self.touch();
        Ok(id)
    }

    /// Drop a player. Only before the first round. Panics if `id` is unknown.
    pub fn remove_player(&mut self, id: PlayerId) -> TournamentResult<Player> {
        self.ensure_roster_open()?;
        let player = self.roster.remove(id);
        self.schedule = None;
        self.touch();
        Ok(player)
    }

    /// Rename a player. Allowed at any time.
    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> TournamentResult<()> {
        self.roster.rename(id, name)?;
        self.touch();
        Ok(())
    }

    /// Store or clear a player's deck list. Allowed at any time.
    pub fn set_deck_list(&mut self, id: PlayerId, deck_list: Option<String>) {
        self.roster.set_deck_list(id, deck_list);
        self.touch();
    }

    // === Main phase ===

    /// Standings over complete main-phase rounds.
    #[must_use]
    pub fn standings(&self) -> Standings {
        Standings::compute(&self.roster, self.rounds.iter())
    }

    /// Main-phase rounds this tournament will play.
    ///
    /// Round robin plays one round per seat pairing: `n - 1` rounds for an
    /// even field, `n` for an odd one.
    #[must_use]
    pub fn rounds_planned(&self) -> u32 {
        match self.config.pairing_mode {
            PairingMode::Swiss => self.config.rounds_planned,
            PairingMode::RoundRobin => {
                let players = self.roster.len() as u32;
                let seats = players + players % 2;
                seats.saturating_sub(1)
            }
        }
    }

    /// Every planned main round generated and fully reported.
    #[must_use]
    pub fn is_main_phase_complete(&self) -> bool {
        self.progress().is_complete()
    }

    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        let (generated, counted) = self.main_rounds().fold((0, 0), |(g, c), round| {
            (g + 1, c + u32::from(round.is_complete()))
        });
        RoundProgress {
            generated,
            planned: self.rounds_planned(),
            counted,
        }
    }

    /// Round-robin pairings for the current roster, computed on first use.
    pub fn round_robin_schedule(&mut self) -> &RoundRobinSchedule {
        let roster = &self.roster;
        self.schedule.get_or_insert_with(|| {
            log::debug!("Building round-robin schedule for {} players", roster.len());
            RoundRobinSchedule::generate(&roster.ids().collect::<Vec<_>>())
        })
    }

    /// Generate the next main-phase round and return its index.
    ///
    /// Every earlier main round must be complete. Returns `ScheduleComplete`
    /// once all planned rounds exist.
    pub fn next_round<S: ShuffleSource>(&mut self, shuffle: &mut S) -> TournamentResult<usize> {
        self.ensure_open()?;
        if self.top_cut_started {
            return Err(TournamentError::TopCutAlreadyStarted);
        }
        if !self.main_rounds().all(Round::is_complete) {
            return Err(TournamentError::RoundNotComplete);
        }
        if self.roster.len() < 2 {
            return Err(TournamentError::InsufficientPlayers {
                have: self.roster.len(),
            });
        }

        let number = self.main_round_count() + 1;
        let round = match self.config.pairing_mode {
            PairingMode::Swiss => {
                let standings = self.standings();
                let history = PairingHistory::from_rounds(self.rounds.iter());
                pair_swiss_round(
                    &standings,
                    &history,
                    number,
                    self.config.rounds_planned,
                    shuffle,
                )?
            }
            PairingMode::RoundRobin => self
                .round_robin_schedule()
                .round(number)
                .ok_or(TournamentError::ScheduleComplete)?,
        };

        log::info!(
            "{}: generated {} ({} matches)",
            self.config.name,
            round.label,
            round.matches.len()
        );
        self.rounds.push_back(round);
        self.touch();
        Ok(self.rounds.len() - 1)
    }

    // === Top cut ===

    /// Seed the bracket from final standings and return the first stage's
    /// round index.
    pub fn start_top_cut(&mut self) -> TournamentResult<usize> {
        self.ensure_open()?;
        let size = self.config.top_cut.ok_or(TournamentError::NoTopCut)?;
        if self.top_cut_started {
            return Err(TournamentError::TopCutAlreadyStarted);
        }
        if !self.is_main_phase_complete() {
            return Err(TournamentError::PhaseNotComplete);
        }

        let round = topcut::seed_bracket(&self.standings().seed_order(), size)?;
        log::info!("{}: top cut started with {}", self.config.name, round.label);
        self.rounds.push_back(round);
        self.top_cut_started = true;
        self.touch();
        Ok(self.rounds.len() - 1)
    }

    /// Move the bracket on once the current stage is decided.
    ///
    /// Returns the new stage's round index, or `None` when the stage just
    /// played produced the champion.
    pub fn advance_stage(&mut self) -> TournamentResult<Option<usize>> {
        self.ensure_open()?;
        if !self.top_cut_started {
            return Err(TournamentError::TopCutNotStarted);
        }
        if self.champion.is_some() {
            return Err(TournamentError::BracketFinished);
        }
        let current = self
            .rounds
            .last()
            .ok_or(TournamentError::TopCutNotStarted)?;

        match topcut::advance(current)? {
            StageAdvance::Next(round) => {
                log::info!("{}: advanced to {}", self.config.name, round.label);
                self.rounds.push_back(round);
                self.touch();
                Ok(Some(self.rounds.len() - 1))
            }
            StageAdvance::Champion(champion) => {
                let name = self.roster.player(champion).name.clone();
                log::info!("{}: {} wins the top cut", self.config.name, name);
                self.champion = Some(champion);
                self.touch();
                Ok(None)
            }
        }
    }

    #[must_use]
    pub fn bracket_state(&self) -> BracketState {
        if !self.top_cut_started {
            return BracketState::NotStarted;
        }
        match (self.champion, self.rounds.last()) {
            (Some(champion), _) => BracketState::Finished { champion },
            (None, Some(round)) => BracketState::StageInProgress {
                players: round.matches.len() * 2,
            },
            (None, None) => BracketState::NotStarted,
        }
    }

    // === Finalization ===

    /// Close the tournament. Needs a complete main phase and, with a top
    /// cut configured, a champion.
    pub fn finalize(&mut self) -> TournamentResult<()> {
        self.ensure_open()?;
        if !self.is_main_phase_complete() {
            return Err(TournamentError::PhaseNotComplete);
        }
        if self.config.top_cut.is_some() {
            if !self.top_cut_started {
                return Err(TournamentError::TopCutNotStarted);
            }
            if self.champion.is_none() {
                return Err(TournamentError::StageNotComplete);
            }
        }
        log::info!("{}: finalized", self.config.name);
        self.finalized = true;
        self.touch();
        Ok(())
    }

    // === Result edits ===

    /// Whether round `index` may take new results. Panics if out of range.
    pub fn check_editable(&self, index: usize) -> TournamentResult<()> {
        let round = self.round(index);
        let locked = self.finalized
            || match round.phase {
                Phase::Swiss => self.top_cut_started,
                Phase::TopCut => index + 1 != self.rounds.len() || self.champion.is_some(),
            };
        if locked {
            return Err(TournamentError::RoundLocked {
                round: round.label.clone(),
            });
        }
        Ok(())
    }

    /// Swap in a round with new outcomes. Pairings must be unchanged.
    pub(crate) fn replace_round(&mut self, index: usize, round: Round) -> TournamentResult<()> {
        self.check_editable(index)?;
        debug_assert_eq!(
            self.round(index).matches.iter().map(|m| (m.p1, m.p2)).collect::<Vec<_>>(),
            round.matches.iter().map(|m| (m.p1, m.p2)).collect::<Vec<_>>(),
            "committed round changed its pairings"
        );
        self.rounds.set(index, round);
        self.touch();
        Ok(())
    }

    // === Helpers ===

    fn main_round_count(&self) -> u32 {
        self.main_rounds().count() as u32
    }

    fn ensure_open(&self) -> TournamentResult<()> {
        if self.finalized {
            Err(TournamentError::TournamentFinalized)
        } else {
            Ok(())
        }
    }

    fn ensure_roster_open(&self) -> TournamentResult<()> {
        self.ensure_open()?;
        if self.rounds.is_empty() {
            Ok(())
        } else {
            Err(TournamentError::RosterLockedAfterRoundsStarted)
        }
    }
}
