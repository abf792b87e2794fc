//! Persistence.
//!
//! ## TournamentStore
//!
//! Whole-aggregate storage keyed by `TournamentId`. The session issues one
//! `put` per successful mutation; last write wins.
//!
//! ## Implementations
//!
//! - `MemoryStore`: hash map, for tests and throwaway sessions
//! - `FileStore`: one bincode file per tournament in a directory
//!
//! ## Backup and listing
//!
//! `export_json`/`import_json` move every tournament through one JSON
//! document. `list` filters and summarizes for a tournament picker.

pub mod backup;
pub mod error;
pub mod file;
pub mod filter;
pub mod memory;

pub use backup::{export_json, import_json, Backup, ImportSummary, BACKUP_KIND, BACKUP_VERSION};
pub use error::StoreError;
pub use file::FileStore;
pub use filter::{age_label, list, TournamentFilter, TournamentSummary};
pub use memory::MemoryStore;

use crate::core::TournamentId;
use crate::tournament::Tournament;

/// Storage for whole tournaments.
pub trait TournamentStore {
    /// Load one tournament.
    fn get(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError>;

    /// Every stored tournament, most recently updated first.
    fn get_all(&self) -> Result<Vec<Tournament>, StoreError>;

    /// Insert or replace.
    fn put(&mut self, tournament: &Tournament) -> Result<(), StoreError>;

    /// Remove. Returns whether anything was stored under `id`.
    fn delete(&mut self, id: TournamentId) -> Result<bool, StoreError>;
}

/// Newest first; ties by name so listings are stable.
pub(crate) fn sort_recent_first(tournaments: &mut [Tournament]) {
    tournaments.sort_by(|a, b| {
        b.updated_at()
            .cmp(&a.updated_at())
            .then_with(|| a.name().cmp(b.name()))
    });
}
