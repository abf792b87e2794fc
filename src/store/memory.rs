//! In-memory store for tests and ephemeral sessions.

use rustc_hash::FxHashMap;

use super::{sort_recent_first, StoreError, TournamentStore};
use crate::core::TournamentId;
use crate::tournament::Tournament;

/// Tournaments kept in a hash map. Never fails.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tournaments: FxHashMap<TournamentId, Tournament>,
    puts: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tournaments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    /// Total `put` calls so far.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.puts
    }
}

impl TournamentStore for MemoryStore {
    fn get(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        Ok(self.tournaments.get(&id).cloned())
    }

    fn get_all(&self) -> Result<Vec<Tournament>, StoreError> {
        let mut all: Vec<_> = self.tournaments.values().cloned().collect();
        sort_recent_first(&mut all);
        Ok(all)
    }

    fn put(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        self.puts += 1;
        self.tournaments.insert(tournament.id(), tournament.clone());
        Ok(())
    }

    fn delete(&mut self, id: TournamentId) -> Result<bool, StoreError> {
        Ok(self.tournaments.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TournamentConfig;

    #[test]
    fn test_put_get_delete() {
        let mut store = MemoryStore::new();
        let t = Tournament::new(TournamentConfig::default().with_name("Local"));

        assert_eq!(store.get(t.id()).unwrap(), None);
        store.put(&t).unwrap();
        assert_eq!(store.get(t.id()).unwrap(), Some(t.clone()));
        assert_eq!(store.len(), 1);

        assert!(store.delete(t.id()).unwrap());
        assert!(!store.delete(t.id()).unwrap());
        assert!(store.is_empty());
        assert_eq!(store.put_count(), 1);
    }

    #[test]
    fn test_get_all_most_recent_first() {
        let mut store = MemoryStore::new();
        let older = Tournament::new(TournamentConfig::default().with_name("Older"));
        let mut newer = Tournament::new(TournamentConfig::default().with_name("Newer"));
        newer.set_updated_at(older.updated_at() + chrono::Duration::seconds(5));

        store.put(&older).unwrap();
        store.put(&newer).unwrap();

        let names: Vec<_> = store
            .get_all()
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }
}
