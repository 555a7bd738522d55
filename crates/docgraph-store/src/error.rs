use docgraph_types::Checksum256;

/// Errors from document table operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A row with this primary key already exists.
    #[error("duplicate primary key: {0}")]
    DuplicatePrimaryKey(u64),

    /// The unique hash index already holds this hash.
    #[error("duplicate hash: {0}")]
    DuplicateHash(Checksum256),

    /// No row with this primary key.
    #[error("row not found: {0}")]
    RowNotFound(u64),

    /// A modify tried to change a field that is fixed at insertion.
    #[error("row {id}: field {field} is immutable")]
    ImmutableField { id: u64, field: &'static str },

    /// Snapshot encoding or decoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The table lock was poisoned by a panicking writer.
    #[error("table lock poisoned")]
    LockPoisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
