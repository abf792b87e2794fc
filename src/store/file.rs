//! Directory-backed store.
//!
//! One bincode document per tournament, named `<id>.bin`. Writes go to a
//! `.tmp` sibling first and are renamed into place, so a crash mid-write
//! leaves the previous document intact.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::{sort_recent_first, StoreError, TournamentStore};
use crate::core::TournamentId;
use crate::tournament::Tournament;

const EXTENSION: &str = "bin";

/// Tournaments stored as files in one directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: TournamentId) -> PathBuf {
        self.dir.join(format!("{}.{}", id, EXTENSION))
    }

    fn read(path: &Path) -> Result<Tournament, StoreError> {
        let mut bytes = Vec::new();
        File::open(path)?.read_to_end(&mut bytes)?;
        Ok(bincode::deserialize(&bytes)?)
    }
}

impl TournamentStore for FileStore {
    fn get(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        Self::read(&path).map(Some)
    }

    /// Unreadable documents are logged and skipped.
    fn get_all(&self) -> Result<Vec<Tournament>, StoreError> {
        let mut all = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read(&path) {
                Ok(tournament) => all.push(tournament),
                Err(err) => log::warn!("Skipping unreadable {}: {}", path.display(), err),
            }
        }
        sort_recent_first(&mut all);
        Ok(all)
    }

    fn put(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        let bytes = bincode::serialize(tournament)?;
        let path = self.path_for(tournament.id());
        let temp = path.with_extension("tmp");

        let mut file = File::create(&temp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp, &path)?;

        log::info!("Saved {} ({} bytes)", tournament.name(), bytes.len());
        Ok(())
    }

    fn delete(&mut self, id: TournamentId) -> Result<bool, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        log::info!("Deleted tournament {}", id);
        Ok(true)
    }
}
