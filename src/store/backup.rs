//! JSON backup of every stored tournament.
//!
//! ```json
//! { "kind": "tcg-tournament-backup", "version": 1,
//!   "exported_at": "2024-05-04T10:00:00Z", "tournaments": [ ... ] }
//! ```
//!
//! Import never overwrites: a tournament whose id is already taken gets a
//! fresh one. Every imported tournament is stamped with the import time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StoreError, TournamentStore};
use crate::core::TournamentId;
use crate::tournament::Tournament;

pub const BACKUP_KIND: &str = "tcg-tournament-backup";
pub const BACKUP_VERSION: u32 = 1;

/// Full backup document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Backup {
    pub kind: String,
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub tournaments: Vec<Tournament>,
}

/// Just enough of a document to tell whether it is ours.
#[derive(Deserialize)]
struct BackupHeader {
    #[serde(default)]
    kind: String,
    #[serde(default)]
    version: u32,
}

/// What an import did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// Tournaments that needed a new id.
    pub reassigned: usize,
}

/// Serialize every stored tournament as a pretty-printed backup.
pub fn export_json<S: TournamentStore + ?Sized>(store: &S) -> Result<String, StoreError> {
    let backup = Backup {
        kind: BACKUP_KIND.to_string(),
        version: BACKUP_VERSION,
        exported_at: Utc::now(),
        tournaments: store.get_all()?,
    };
    log::info!("Exported {} tournaments", backup.tournaments.len());
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Load a backup into `store`.
pub fn import_json<S: TournamentStore + ?Sized>(
    store: &mut S,
    json: &str,
) -> Result<ImportSummary, StoreError> {
    let header: BackupHeader = serde_json::from_str(json)?;
    if header.kind != BACKUP_KIND || header.version != BACKUP_VERSION {
        return Err(StoreError::InvalidBackup {
            kind: header.kind,
            version: header.version,
        });
    }
    let backup: Backup = serde_json::from_str(json)?;

    let now = Utc::now();
    let mut summary = ImportSummary::default();
    for mut tournament in backup.tournaments {
        if store.get(tournament.id())?.is_some() {
            let fresh = TournamentId::generate();
            log::debug!("Backup id {} already stored; importing as {}", tournament.id(), fresh);
            tournament.reassign_id(fresh);
            summary.reassigned += 1;
        }
        tournament.set_updated_at(now);
        store.put(&tournament)?;
        summary.imported += 1;
    }

    log::info!(
        "Imported {} tournaments ({} with new ids)",
        summary.imported,
        summary.reassigned
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TournamentConfig;
    use crate::store::MemoryStore;

    fn store_with(names: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::new();
        for name in names {
            let mut t = Tournament::new(TournamentConfig::default().with_name(name));
            t.add_player("Ash").unwrap();
            store.put(&t).unwrap();
        }
        store
    }

    #[test]
    fn test_export_document_shape() {
        let store = store_with(&["One", "Two"]);
        let json = export_json(&store).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], BACKUP_KIND);
        assert_eq!(value["version"], 1);
        assert!(value["exported_at"].is_string());
        assert_eq!(value["tournaments"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_import_into_empty_store_keeps_ids() {
        let source = store_with(&["One", "Two"]);
        let json = export_json(&source).unwrap();

        let mut target = MemoryStore::new();
        let summary = import_json(&mut target, &json).unwrap();
        assert_eq!(summary, ImportSummary { imported: 2, reassigned: 0 });

        for t in source.get_all().unwrap() {
            let imported = target.get(t.id()).unwrap().unwrap();
            assert_eq!(imported.name(), t.name());
            assert_eq!(imported.roster(), t.roster());
        }
    }

    #[test]
    fn test_import_reassigns_colliding_ids() {
        let mut store = store_with(&["Only"]);
        let json = export_json(&store).unwrap();
        let original = store.get_all().unwrap().remove(0);

        let summary = import_json(&mut store, &json).unwrap();
        assert_eq!(summary, ImportSummary { imported: 1, reassigned: 1 });

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|t| t.name() == "Only"));
        assert_eq!(store.get(original.id()).unwrap(), Some(original));
    }

    #[test]
    fn test_import_rejects_foreign_documents() {
        let mut store = MemoryStore::new();
        let err = import_json(&mut store, r#"{"kind":"deck-list","version":1,"tournaments":[]}"#)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidBackup { ref kind, version: 1 } if kind == "deck-list"));

        let err = import_json(
            &mut store,
            r#"{"kind":"tcg-tournament-backup","version":2,"tournaments":[]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidBackup { version: 2, .. }));

        let err = import_json(&mut store, "[1, 2, 3]").unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
        assert!(store.is_empty());
    }
}
