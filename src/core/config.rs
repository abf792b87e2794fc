//! Tournament configuration.
//!
//! - `Format`: best-of-1 or best-of-3 (sets the default round clock)
//! - `EventKind`: event tier, metadata for listing filters
//! - `PairingMode`: Swiss or round robin
//! - `CutSize`: single-elimination bracket size
//! - `TournamentConfig`: everything above plus name and planned rounds

use serde::{Deserialize, Serialize};

/// Match format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// Single game per match.
    #[default]
    Bo1,
    /// First to two game wins.
    Bo3,
}

impl Format {
    /// Default round clock in minutes.
    #[must_use]
    pub const fn default_round_minutes(self) -> u32 {
        match self {
            Format::Bo1 => 25,
            Format::Bo3 => 50,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Bo1 => write!(f, "Bo1"),
            Format::Bo3 => write!(f, "Bo3"),
        }
    }
}

/// Event tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Local,
    #[default]
    Cup,
    Challenge,
    Regional,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Local => "Local",
            EventKind::Cup => "Cup",
            EventKind::Challenge => "Challenge",
            EventKind::Regional => "Regional",
        };
        f.write_str(name)
    }
}

/// How main-phase rounds are paired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairingMode {
    /// Pair by current points, one round at a time.
    #[default]
    Swiss,
    /// Everyone plays everyone, on a fixed schedule.
    RoundRobin,
}

/// Top-cut bracket size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutSize {
    Top2,
    Top4,
    Top8,
    Top16,
}

impl CutSize {
    /// Number of players in the bracket.
    #[must_use]
    pub const fn players(self) -> usize {
        match self {
            CutSize::Top2 => 2,
            CutSize::Top4 => 4,
            CutSize::Top8 => 8,
            CutSize::Top16 => 16,
        }
    }

    /// Parse a bracket size from a player count.
    #[must_use]
    pub const fn from_players(players: usize) -> Option<Self> {
        match players {
            2 => Some(CutSize::Top2),
            4 => Some(CutSize::Top4),
            8 => Some(CutSize::Top8),
            16 => Some(CutSize::Top16),
            _ => None,
        }
    }
}

/// Tournament settings chosen by the organizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Display name.
    pub name: String,

    /// Match format.
    pub format: Format,

    /// Event tier.
    pub kind: EventKind,

    /// Swiss or round robin.
    pub pairing_mode: PairingMode,

    /// Swiss rounds to play (at least 1). Ignored for round robin,
    /// whose length follows from the player count.
    pub rounds_planned: u32,

    /// Bracket played after the main phase, if any.
    pub top_cut: Option<CutSize>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: "New tournament".to_string(),
            format: Format::Bo1,
            kind: EventKind::Cup,
            pairing_mode: PairingMode::Swiss,
            rounds_planned: 5,
            top_cut: None,
        }
    }
}

impl TournamentConfig {
    /// Set the display name. Blank names fall back to "Untitled tournament".
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        let name = name.trim();
        self.name = if name.is_empty() {
            "Untitled tournament".to_string()
        } else {
            name.to_string()
        };
        self
    }

    /// Set the match format.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set the event tier.
    #[must_use]
    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Switch to round-robin pairing.
    #[must_use]
    pub fn round_robin(mut self) -> Self {
        self.pairing_mode = PairingMode::RoundRobin;
        self
    }

    /// Set the number of Swiss rounds (clamped to at least 1).
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds_planned = rounds.max(1);
        self
    }

    /// Play a top cut of the given size after the main phase.
    #[must_use]
    pub fn with_top_cut(mut self, size: CutSize) -> Self {
        self.top_cut = Some(size);
        self
    }
}
