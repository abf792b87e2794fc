//! Editing session: one tournament, its draft, its store.
//!
//! A `Session` is the only way callers mutate a tournament. Each mutation
//! runs against a copy of the aggregate; the copy replaces the live value
//! only when the operation succeeds, and only then is the tournament saved.
//! Rejections leave everything as it was and are passed to the `Notifier`.
//!
//! A failed save is logged and notified but does not undo the in-memory
//! change.
//!
//! ## Example
//!
//! ```
//! use tcg_tournament::core::{PairingRng, TournamentConfig};
//! use tcg_tournament::rounds::MatchOutcome;
//! use tcg_tournament::session::Session;
//! use tcg_tournament::store::MemoryStore;
//!
//! let config = TournamentConfig::default().with_name("Tuesday").with_rounds(1);
//! let mut session = Session::create(config, MemoryStore::new(), PairingRng::new(42));
//! session.add_player("Ash").unwrap();
//! session.add_player("Misty").unwrap();
//!
//! let round = session.next_round().unwrap();
//! let p1 = session.tournament().round(round).matches[0].p1;
//! session.set_result(0, MatchOutcome::Decisive(p1)).unwrap();
//! session.commit().unwrap();
//!
//! assert_eq!(session.standings().rows()[0].player, p1);
//! ```

pub mod notify;

pub use notify::{LogNotifier, Notifier};

use crate::core::{
    CutSize, EventKind, Format, Player, PlayerId, ShuffleSource, TournamentConfig,
    TournamentError, TournamentId, TournamentResult,
};
use crate::draft::{CommitReceipt, DraftController};
use crate::pairing::RoundRobinSchedule;
use crate::rounds::MatchOutcome;
use crate::standings::Standings;
use crate::store::{StoreError, TournamentStore};
use crate::topcut::BracketState;
use crate::tournament::{RoundProgress, Tournament};

/// Live editing context for one tournament.
pub struct Session<S, R, N = LogNotifier> {
    tournament: Tournament,
    drafts: DraftController,
    store: S,
    shuffle: R,
    notifier: N,
}

impl<S: TournamentStore, R: ShuffleSource> Session<S, R, LogNotifier> {
    /// Start a new tournament and save it.
    pub fn create(config: TournamentConfig, store: S, shuffle: R) -> Self {
        let mut session = Self {
            tournament: Tournament::new(config),
            drafts: DraftController::new(),
            store,
            shuffle,
            notifier: LogNotifier,
        };
        log::info!("Created tournament {} ({})", session.tournament.name(), session.tournament.id());
        session.save();
        session
    }

    /// Resume a stored tournament. `None` if `id` is not stored.
    pub fn open(id: TournamentId, store: S, shuffle: R) -> Result<Option<Self>, StoreError> {
        let Some(tournament) = store.get(id)? else {
            return Ok(None);
        };
        log::info!("Opened tournament {} ({})", tournament.name(), id);
        Ok(Some(Self {
            tournament,
            drafts: DraftController::new(),
            store,
            shuffle,
            notifier: LogNotifier,
        }))
    }
}

impl<S: TournamentStore, R: ShuffleSource, N: Notifier> Session<S, R, N> {
    /// Report rejections somewhere else.
    pub fn with_notifier<M: Notifier>(self, notifier: M) -> Session<S, R, M> {
        Session {
            tournament: self.tournament,
            drafts: self.drafts,
            store: self.store,
            shuffle: self.shuffle,
            notifier,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    #[must_use]
    pub fn drafts(&self) -> &DraftController {
        &self.drafts
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Standings from committed results only.
    #[must_use]
    pub fn standings(&self) -> Standings {
        self.tournament.standings()
    }

    #[must_use]
    pub fn progress(&self) -> RoundProgress {
        self.tournament.progress()
    }

    #[must_use]
    pub fn bracket_state(&self) -> BracketState {
        self.tournament.bracket_state()
    }

    /// Round-robin pairings for the current roster.
    pub fn round_robin_schedule(&mut self) -> RoundRobinSchedule {
        self.tournament.round_robin_schedule().clone()
    }

    /// Give the store back, ending the session.
    pub fn into_store(self) -> S {
        self.store
    }

    // === Settings ===

    pub fn rename(&mut self, name: &str) -> TournamentResult<()> {
        self.mutate(|t, _, _| {
            t.rename(name);
            Ok(())
        })
    }

    pub fn set_format(&mut self, format: Format) -> TournamentResult<()> {
        self.mutate(|t, _, _| t.set_format(format))
    }

    pub fn set_kind(&mut self, kind: EventKind) -> TournamentResult<()> {
        self.mutate(|t, _, _| t.set_kind(kind))
    }

    pub fn set_rounds_planned(&mut self, rounds: u32) -> TournamentResult<()> {
        self.mutate(|t, _, _| t.set_rounds_planned(rounds))
    }

    pub fn set_top_cut(&mut self, size: Option<CutSize>) -> TournamentResult<()> {
        self.mutate(|t, _, _| t.set_top_cut(size))
    }

    // === Roster ===

    pub fn add_player(&mut self, name: &str) -> TournamentResult<PlayerId> {
        self.mutate(|t, _, _| t.add_player(name))
    }

    pub fn remove_player(&mut self, id: PlayerId) -> TournamentResult<Player> {
        self.mutate(|t, _, _| t.remove_player(id))
    }

    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> TournamentResult<()> {
        self.mutate(|t, _, _| t.rename_player(id, name))
    }

    pub fn set_deck_list(&mut self, id: PlayerId, deck_list: Option<String>) -> TournamentResult<()> {
        self.mutate(|t, _, _| {
            t.set_deck_list(id, deck_list);
            Ok(())
        })
    }

    // === Rounds ===

    /// Generate the next main round and open it for editing unless another
    /// draft has unsaved edits.
    pub fn next_round(&mut self) -> TournamentResult<usize> {
        self.mutate(|t, drafts, shuffle| {
            let index = t.next_round(shuffle)?;
            open_if_clean(t, drafts, index)?;
            Ok(index)
        })
    }

    /// Seed the top cut and open its first stage for editing.
    pub fn start_top_cut(&mut self) -> TournamentResult<usize> {
        self.mutate(|t, drafts, _| {
            let index = t.start_top_cut()?;
            open_if_clean(t, drafts, index)?;
            Ok(index)
        })
    }

    /// Advance the bracket. `None` once the champion is decided.
    pub fn advance_stage(&mut self) -> TournamentResult<Option<usize>> {
        self.mutate(|t, drafts, _| {
            let index = t.advance_stage()?;
            if let Some(index) = index {
                open_if_clean(t, drafts, index)?;
            }
            Ok(index)
        })
    }

    /// Close the tournament. Refused while a draft has unsaved edits.
    pub fn finalize(&mut self) -> TournamentResult<()> {
        self.mutate(|t, drafts, _| {
            if let Some(draft) = drafts.active() {
                if draft.is_dirty() {
                    return Err(TournamentError::DraftConflict {
                        dirty_round: t.round(draft.round_index()).label.clone(),
                    });
                }
                drafts.cancel()?;
            }
            t.finalize()
        })
    }

    // === Drafts ===

    pub fn begin_edit(&mut self, index: usize) -> TournamentResult<()> {
        self.edit(|t, drafts| drafts.begin_edit(t, index))
    }

    pub fn begin_edit_discarding(&mut self, index: usize) -> TournamentResult<()> {
        self.edit(|t, drafts| drafts.begin_edit_discarding(t, index))
    }

    pub fn set_result(&mut self, match_index: usize, outcome: MatchOutcome) -> TournamentResult<()> {
        self.edit(|_, drafts| drafts.set_result(match_index, outcome))
    }

    pub fn cancel(&mut self) -> TournamentResult<()> {
        self.edit(|_, drafts| drafts.cancel())
    }

    /// Write the open draft. The receipt says whether the bracket can now
    /// be advanced.
    pub fn commit(&mut self) -> TournamentResult<CommitReceipt> {
        self.mutate(|t, drafts, _| drafts.commit(t))
    }

    // === Helpers ===

    /// Run a tournament mutation on a copy; keep and save it on success.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Tournament, &mut DraftController, &mut R) -> TournamentResult<T>,
    ) -> TournamentResult<T> {
        let mut tournament = self.tournament.clone();
        let mut drafts = self.drafts.clone();
        match op(&mut tournament, &mut drafts, &mut self.shuffle) {
            Ok(value) => {
                self.tournament = tournament;
                self.drafts = drafts;
                self.save();
                Ok(value)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Run a draft-only operation. Nothing is saved.
    fn edit<T>(
        &mut self,
        op: impl FnOnce(&Tournament, &mut DraftController) -> TournamentResult<T>,
    ) -> TournamentResult<T> {
        op(&self.tournament, &mut self.drafts).map_err(|err| self.reject(err))
    }

    fn reject(&mut self, err: TournamentError) -> TournamentError {
        self.notifier.notify(&err.to_string());
        err
    }

    fn save(&mut self) {
        if let Err(err) = self.store.put(&self.tournament) {
            log::warn!("Saving {} failed: {}", self.tournament.name(), err);
            self.notifier.notify(&format!("Could not save {}: {}", self.tournament.name(), err));
        }
    }
}

/// Open `index` for editing unless the current draft holds unsaved edits.
fn open_if_clean(
    tournament: &Tournament,
    drafts: &mut DraftController,
    index: usize,
) -> TournamentResult<()> {
    if drafts.is_dirty() {
        Ok(())
    } else {
        drafts.begin_edit(tournament, index)
    }
}
