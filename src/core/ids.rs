//! Identifier types.
//!
//! ## PlayerId
//!
//! Players are numbered sequentially within their tournament, starting at 1.
//! Ids are never reused, even after a pre-round removal.
//!
//! ## TournamentId
//!
//! Random UUID (v4) assigned at creation and used as the storage key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Player identifier, unique within one tournament.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Tournament identifier.
///
/// ```
/// use tcg_tournament::core::TournamentId;
///
/// let a = TournamentId::generate();
/// let b = TournamentId::generate();
/// assert_ne!(a, b);
///
/// let parsed: TournamentId = a.to_string().parse().unwrap();
/// assert_eq!(a, parsed);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TournamentId(pub Uuid);

impl TournamentId {
    /// Generate a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for TournamentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TournamentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
