//! # tcg-tournament
//!
//! Swiss and round-robin tournament management for trading card game events,
//! with an optional single-elimination top cut.
//!
//! ## Design Principles
//!
//! 1. **Committed State Only**: Standings and pairings read committed
//!    results. Result entry goes through a draft that is committed as a
//!    whole or not at all.
//!
//! 2. **Explicit Context**: There is no global "current tournament". A
//!    `Session` owns one tournament and is passed where it is needed.
//!
//! 3. **Reproducible Pairing**: Shuffling comes from an injected
//!    `ShuffleSource`; a seeded `PairingRng` replays the same pairings.
//!
//! ## Architecture
//!
//! - **Tagged Outcomes**: A match result is `Unset`, `Decisive(winner)`,
//!   `Tie` or `Bye(player)`. No string codes.
//!
//! - **Persistent Data Structures**: Rounds are kept in an `im::Vector`, so
//!   snapshotting the aggregate before a mutation is cheap.
//!
//! - **Pure Standings**: Standings are recomputed from history on demand and
//!   never stored.
//!
//! ## Modules
//!
//! - `core`: ids, players, configuration, errors, shuffling
//! - `rounds`: matches, outcomes, rounds
//! - `standings`: points and resistance tiebreakers
//! - `pairing`: Swiss pairing and round-robin scheduling
//! - `topcut`: single-elimination bracket
//! - `tournament`: the aggregate and its lifecycle
//! - `draft`: draft/commit result editing
//! - `session`: editing context, persistence hooks, notifications
//! - `store`: storage backends, listing, JSON backup

pub mod core;
pub mod rounds;
pub mod standings;
pub mod pairing;
pub mod topcut;
pub mod tournament;
pub mod draft;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, TournamentId,
    Player, Roster,
    TournamentConfig, Format, EventKind, PairingMode, CutSize,
    TournamentError, TournamentResult,
    PairingRng, PairingRngState, ShuffleSource,
};

pub use crate::rounds::{Match, MatchOutcome, MatchRecord, Phase, Round};

pub use crate::standings::{StandingRow, Standings};

pub use crate::pairing::{pair_swiss_round, PairingHistory, RoundRobinSchedule};

pub use crate::topcut::{BracketState, StageAdvance};

pub use crate::tournament::{RoundProgress, Tournament};

pub use crate::draft::{CommitReceipt, DraftController, DraftState, RoundDraft};

pub use crate::session::{LogNotifier, Notifier, Session};

pub use crate::store::{
    FileStore, MemoryStore, StoreError, TournamentFilter, TournamentStore, TournamentSummary,
};
