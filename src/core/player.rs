//! Players and the tournament roster.
//!
//! ## Player
//!
//! A display name plus an optional deck list. The deck list is opaque text
//! owned by an external parser; the core only stores it.
//!
//! ## Roster
//!
//! Ordered player list. Display names are unique case-insensitively and
//! ids are allocated sequentially. Whether the roster may change at all is
//! decided by the owning `Tournament`.

use serde::{Deserialize, Serialize};

use super::error::{TournamentError, TournamentResult};
use super::ids::PlayerId;

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique within the tournament.
    pub id: PlayerId,

    /// Display name (trimmed, never empty).
    pub name: String,

    /// Raw deck list text, if the player submitted one.
    pub deck_list: Option<String>,
}

impl Player {
    /// Create a player without a deck list.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            deck_list: None,
        }
    }
}

/// Ordered player list with case-insensitive unique names.
///
/// ## Example
///
/// ```
/// use tcg_tournament::core::Roster;
///
/// let mut roster = Roster::new();
/// let ash = roster.add("Ash").unwrap();
/// assert!(roster.add("  ASH ").is_err());
///
/// roster.rename(ash, "Ash Ketchum").unwrap();
/// assert_eq!(roster.player(ash).name, "Ash Ketchum");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    next_id: u32,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate players in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate player ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// Look up a player.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player, panicking if the id is unknown.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        self.get(id)
            .unwrap_or_else(|| panic!("{} is not registered", id))
    }

    /// Check whether an id is registered.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    /// Find a player by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let wanted = name.trim().to_lowercase();
        self.players
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    /// Register a player and return the new id.
    pub fn add(&mut self, name: &str) -> TournamentResult<PlayerId> {
        let name = self.check_name(name, None)?;
        self.next_id += 1;
        let id = PlayerId::new(self.next_id);
        self.players.push(Player::new(id, name));
        Ok(id)
    }

    /// Remove a player. Panics if the id is unknown.
    pub fn remove(&mut self, id: PlayerId) -> Player {
        let index = self
            .players
            .iter()
            .position(|p| p.id == id)
            .unwrap_or_else(|| panic!("{} is not registered", id));
        self.players.remove(index)
    }

    /// Change a player's display name.
    pub fn rename(&mut self, id: PlayerId, name: &str) -> TournamentResult<()> {
        let name = self.check_name(name, Some(id))?;
        self.player_mut(id).name = name;
        Ok(())
    }

    /// Attach or clear a deck list.
    pub fn set_deck_list(&mut self, id: PlayerId, deck_list: Option<String>) {
        self.player_mut(id).deck_list = deck_list;
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .unwrap_or_else(|| panic!("{} is not registered", id))
    }

    /// Trim and validate a name; `renaming` is ignored in the duplicate check.
    fn check_name(&self, name: &str, renaming: Option<PlayerId>) -> TournamentResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        if let Some(existing) = self.find_by_name(name) {
            if Some(existing.id) != renaming {
                return Err(TournamentError::DuplicatePlayerName {
                    name: name.to_string(),
                    existing: existing.id,
                });
            }
        }
        Ok(name.to_string())
    }
}
