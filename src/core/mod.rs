//! Core types: identifiers, players, errors, shuffling, configuration.
//!
//! Everything here is independent of how rounds are paired or scored.

pub mod config;
pub mod error;
pub mod ids;
pub mod player;
pub mod rng;

pub use config::{CutSize, EventKind, Format, PairingMode, TournamentConfig};
pub use error::{TournamentError, TournamentResult};
pub use ids::{PlayerId, TournamentId};
pub use player::{Player, Roster};
pub use rng::{PairingRng, PairingRngState, ShuffleSource};
