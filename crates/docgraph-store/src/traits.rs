use docgraph_content::ContentGroups;
use docgraph_types::{Checksum256, Name, TimePoint};

use crate::batch::WriteBatch;
use crate::error::StoreResult;
use crate::row::DocumentRow;

/// Indexed, transactional document table.
///
/// All implementations must satisfy these invariants:
/// - `apply` is atomic: either every op in the batch takes effect or the
///   table is left exactly as it was.
/// - The hash index is unique and enforced inside `apply` and `insert_new`,
///   so two writers racing to insert the same content cannot both succeed.
/// - `insert_new` picks the primary key under the same critical section as
///   the write, so concurrent creators never collide on an id.
/// - Primary keys handed out by `available_primary_key` are never reused.
/// - A row's `hash` and `content_groups` are immutable once inserted.
pub trait DocumentTable: Send + Sync {
    /// The next unused primary key.
    fn available_primary_key(&self) -> StoreResult<u64>;

    /// Insert a new row under the next unused primary key and return it.
    ///
    /// The hash index is checked first: content that is already stored fails
    /// with `StoreError::DuplicateHash` whatever ids other writers took.
    fn insert_new(
        &self,
        hash: Checksum256,
        creator: Name,
        content_groups: ContentGroups,
        created_date: TimePoint,
    ) -> StoreResult<u64>;

    /// Apply a batch of writes atomically.
    fn apply(&self, batch: WriteBatch) -> StoreResult<()>;

    /// Point lookup by primary key.
    fn get(&self, id: u64) -> StoreResult<Option<DocumentRow>>;

    /// Point lookup on the unique hash index.
    fn find_by_hash(&self, hash: &Checksum256) -> StoreResult<Option<DocumentRow>>;

    /// All rows created by `creator`, in primary-key order.
    fn scan_by_creator(&self, creator: Name) -> StoreResult<Vec<DocumentRow>>;

    /// Rows whose creation second lies in `from_sec..=to_sec`, ordered by
    /// creation time then primary key.
    fn scan_by_created(&self, from_sec: i64, to_sec: i64) -> StoreResult<Vec<DocumentRow>>;

    /// Every row in primary-key order.
    fn rows(&self) -> StoreResult<Vec<DocumentRow>>;

    /// Number of rows.
    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Insert one row as a single-op batch.
    fn insert(&self, row: DocumentRow) -> StoreResult<()> {
        self.apply(WriteBatch::new().insert(row))
    }

    /// Modify one row as a single-op batch.
    fn modify(&self, row: DocumentRow) -> StoreResult<()> {
        self.apply(WriteBatch::new().modify(row))
    }

    /// Erase one row as a single-op batch.
    fn erase(&self, id: u64) -> StoreResult<()> {
        self.apply(WriteBatch::new().erase(id))
    }
}
