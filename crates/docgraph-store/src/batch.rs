use crate::row::DocumentRow;

/// A single staged mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    /// Insert a new row. Fails on a duplicate primary key or hash.
    Insert(DocumentRow),
    /// Replace the row with the same primary key. Hash and content must match.
    Modify(DocumentRow),
    /// Remove the row with this primary key.
    Erase(u64),
}

/// Ordered mutations applied as one all-or-nothing unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, row: DocumentRow) -> Self {
        self.ops.push(WriteOp::Insert(row));
        self
    }

    pub fn modify(mut self, row: DocumentRow) -> Self {
        self.ops.push(WriteOp::Modify(row));
        self
    }

    pub fn erase(mut self, id: u64) -> Self {
        self.ops.push(WriteOp::Erase(id));
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}
