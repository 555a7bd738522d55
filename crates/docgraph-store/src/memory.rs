use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use docgraph_content::ContentGroups;
use docgraph_types::{Checksum256, Name, TimePoint};
use tracing::debug;

use crate::batch::{WriteBatch, WriteOp};
use crate::error::{StoreError, StoreResult};
use crate::row::DocumentRow;
use crate::traits::DocumentTable;

/// In-memory, `BTreeMap`-based document table.
///
/// Intended for tests, embedding, and as the working copy behind the CLI's
/// JSON snapshot. State sits behind one `RwLock`; `apply` holds the write
/// lock for the whole batch and rolls back through an undo log on the first
/// failing op.
pub struct InMemoryDocumentTable {
    inner: RwLock<TableState>,
}

#[derive(Default)]
pub(crate) struct TableState {
    pub(crate) rows: BTreeMap<u64, DocumentRow>,
    by_hash: HashMap<Checksum256, u64>,
    by_creator: BTreeSet<(u64, u64)>,
    by_created: BTreeSet<(i64, u64)>,
    pub(crate) next_primary_key: u64,
}

enum Undo {
    Remove(u64),
    Restore(DocumentRow),
}

impl TableState {
    fn index(&mut self, row: DocumentRow) {
        self.by_hash.insert(row.by_hash(), row.id);
        self.by_creator.insert((row.by_creator(), row.id));
        self.by_created.insert((row.by_created(), row.id));
        self.rows.insert(row.id, row);
    }

    fn unindex(&mut self, id: u64) -> Option<DocumentRow> {
        let row = self.rows.remove(&id)?;
        self.by_hash.remove(&row.hash);
        self.by_creator.remove(&(row.by_creator(), id));
        self.by_created.remove(&(row.by_created(), id));
        Some(row)
    }

    pub(crate) fn insert(&mut self, row: DocumentRow) -> StoreResult<()> {
        if self.rows.contains_key(&row.id) {
            return Err(StoreError::DuplicatePrimaryKey(row.id));
        }
        if self.by_hash.contains_key(&row.hash) {
            return Err(StoreError::DuplicateHash(row.hash));
        }
        self.next_primary_key = self.next_primary_key.max(row.id.saturating_add(1));
        self.index(row);
        Ok(())
    }

    fn apply_op(&mut self, op: WriteOp) -> StoreResult<Undo> {
        match op {
            WriteOp::Insert(row) => {
                let id = row.id;
                self.insert(row)?;
                Ok(Undo::Remove(id))
            }
            WriteOp::Modify(row) => {
                let existing = self
                    .rows
                    .get(&row.id)
                    .ok_or(StoreError::RowNotFound(row.id))?;
                if existing.hash != row.hash {
                    return Err(StoreError::ImmutableField {
                        id: row.id,
                        field: "hash",
                    });
                }
                if existing.content_groups != row.content_groups {
                    return Err(StoreError::ImmutableField {
                        id: row.id,
                        field: "content_groups",
                    });
                }
                let previous = self.unindex(row.id).ok_or(StoreError::RowNotFound(row.id))?;
                self.index(row);
                Ok(Undo::Restore(previous))
            }
            WriteOp::Erase(id) => {
                let previous = self.unindex(id).ok_or(StoreError::RowNotFound(id))?;
                Ok(Undo::Restore(previous))
            }
        }
    }

    fn rollback(&mut self, undo_log: Vec<Undo>, next_primary_key: u64) {
        for undo in undo_log.into_iter().rev() {
            match undo {
                Undo::Remove(id) => {
                    self.unindex(id);
                }
                Undo::Restore(row) => {
                    self.unindex(row.id);
                    self.index(row);
                }
            }
        }
        self.next_primary_key = next_primary_key;
    }

    fn collect(&self, ids: impl Iterator<Item = u64>) -> Vec<DocumentRow> {
        ids.filter_map(|id| self.rows.get(&id).cloned()).collect()
    }
}

impl InMemoryDocumentTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TableState::default()),
        }
    }

    pub(crate) fn from_state(state: TableState) -> Self {
        Self {
            inner: RwLock::new(state),
        }
    }

    pub(crate) fn read_state(&self) -> StoreResult<RwLockReadGuard<'_, TableState>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, TableState>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }

}

impl Default for InMemoryDocumentTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTable for InMemoryDocumentTable {
    fn available_primary_key(&self) -> StoreResult<u64> {
        Ok(self.read_state()?.next_primary_key)
    }

    fn insert_new(
        &self,
        hash: Checksum256,
        creator: Name,
        content_groups: ContentGroups,
        created_date: TimePoint,
    ) -> StoreResult<u64> {
        let mut state = self.write_state()?;
        if state.by_hash.contains_key(&hash) {
            return Err(StoreError::DuplicateHash(hash));
        }
        let id = state.next_primary_key;
        state.insert(DocumentRow {
            id,
            hash,
            creator,
            content_groups,
            created_date,
        })?;
        debug!(id, hash = %hash.short_hex(), "row inserted under assigned key");
        Ok(id)
    }

    fn apply(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut state = self.write_state()?;
        let ops = batch.into_ops();
        let op_count = ops.len();
        let next_primary_key = state.next_primary_key;
        let mut undo_log = Vec::with_capacity(op_count);

        for op in ops {
            match state.apply_op(op) {
                Ok(undo) => undo_log.push(undo),
                Err(e) => {
                    debug!(applied = undo_log.len(), error = %e, "write batch rejected; rolling back");
                    state.rollback(undo_log, next_primary_key);
                    return Err(e);
                }
            }
        }

        debug!(ops = op_count, rows = state.rows.len(), "write batch applied");
        Ok(())
    }

    fn get(&self, id: u64) -> StoreResult<Option<DocumentRow>> {
        Ok(self.read_state()?.rows.get(&id).cloned())
    }

    fn find_by_hash(&self, hash: &Checksum256) -> StoreResult<Option<DocumentRow>> {
        let state = self.read_state()?;
        Ok(state
            .by_hash
            .get(hash)
            .and_then(|id| state.rows.get(id))
            .cloned())
    }

    fn scan_by_creator(&self, creator: Name) -> StoreResult<Vec<DocumentRow>> {
        let state = self.read_state()?;
        let key = creator.value();
        let ids = state
            .by_creator
            .range((key, 0)..=(key, u64::MAX))
            .map(|&(_, id)| id);
        Ok(state.collect(ids))
    }

    fn scan_by_created(&self, from_sec: i64, to_sec: i64) -> StoreResult<Vec<DocumentRow>> {
        if from_sec > to_sec {
            return Ok(Vec::new());
        }
        let state = self.read_state()?;
        let ids = state
            .by_created
            .range((from_sec, 0)..=(to_sec, u64::MAX))
            .map(|&(_, id)| id);
        Ok(state.collect(ids))
    }

    fn rows(&self) -> StoreResult<Vec<DocumentRow>> {
        Ok(self.read_state()?.rows.values().cloned().collect())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read_state()?.rows.len())
    }
}

impl std::fmt::Debug for InMemoryDocumentTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryDocumentTable")
            .field("row_count", &count)
            .finish()
    }
}
