//! JSON snapshot persistence for [`InMemoryDocumentTable`].
//!
//! A snapshot holds every row plus the primary key counter. Saving writes a
//! temporary file next to the target and renames it into place, so a crash
//! mid-write never leaves a truncated snapshot behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::memory::{InMemoryDocumentTable, TableState};
use crate::row::DocumentRow;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    next_primary_key: u64,
    rows: Vec<DocumentRow>,
}

impl InMemoryDocumentTable {
    /// Write all rows to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let snapshot = {
            let state = self.read_state()?;
            Snapshot {
                next_primary_key: state.next_primary_key,
                rows: state.rows.values().cloned().collect(),
            }
        };
        let data = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %path.display(), rows = snapshot.rows.len(), "snapshot saved");
        Ok(())
    }

    /// Rebuild a table from a snapshot. A missing file yields an empty table.
    ///
    /// Every row is re-inserted, so duplicate ids or hashes in the file are
    /// rejected rather than silently shadowed.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no snapshot found; starting with an empty table");
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot: Snapshot =
            serde_json::from_slice(&data).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut state = TableState::default();
        let row_count = snapshot.rows.len();
        for row in snapshot.rows {
            state.insert(row)?;
        }
        state.next_primary_key = state.next_primary_key.max(snapshot.next_primary_key);

        debug!(path = %path.display(), rows = row_count, "snapshot loaded");
        Ok(Self::from_state(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DocumentTable;
    use docgraph_content::{hash_groups, Content, ContentGroups};
    use docgraph_types::{Asset, Symbol, TimePoint};

    fn row(id: u64, title: &str) -> DocumentRow {
        let content_groups: ContentGroups = vec![vec![Content::new("title", title)]];
        DocumentRow {
            id,
            hash: hash_groups(&content_groups),
            creator: "alice".parse().unwrap(),
            content_groups,
            created_date: TimePoint::from_secs(1_600_000_000),
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let table = InMemoryDocumentTable::new();
        table.insert(row(0, "one")).unwrap();
        table.insert(row(1, "two")).unwrap();
        table.erase(1).unwrap();
        table.save(&path).unwrap();

        let loaded = InMemoryDocumentTable::load(&path).unwrap();
        assert_eq!(loaded.rows().unwrap(), table.rows().unwrap());
        assert_eq!(loaded.available_primary_key().unwrap(), 2);
        let hash = row(0, "one").hash;
        assert_eq!(loaded.find_by_hash(&hash).unwrap().unwrap().id, 0);
    }

    #[test]
    fn extreme_values_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extremes.json");
        let content_groups: ContentGroups = vec![vec![
            Content::new("late", TimePoint::from_micros(i64::MAX)),
            Content::new("debt", Asset::new(i64::MIN, Symbol::new(0, "X").unwrap())),
        ]];
        let extreme = DocumentRow {
            id: 0,
            hash: hash_groups(&content_groups),
            creator: "alice".parse().unwrap(),
            content_groups,
            created_date: TimePoint::from_micros(i64::MIN),
        };

        let table = InMemoryDocumentTable::new();
        table.insert(extreme.clone()).unwrap();
        table.save(&path).unwrap();

        let loaded = InMemoryDocumentTable::load(&path).unwrap();
        assert_eq!(loaded.get(0).unwrap(), Some(extreme));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = InMemoryDocumentTable::load(&dir.path().join("absent.json")).unwrap();
        assert!(table.is_empty().unwrap());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        InMemoryDocumentTable::new().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn duplicate_rows_in_snapshot_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        let snapshot = Snapshot {
            next_primary_key: 2,
            rows: vec![row(0, "same"), row(1, "same")],
        };
        fs::write(&path, serde_json::to_vec(&snapshot).unwrap()).unwrap();
        assert!(matches!(
            InMemoryDocumentTable::load(&path),
            Err(StoreError::DuplicateHash(_))
        ));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            InMemoryDocumentTable::load(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
