//! Indexed document table for docgraph.
//!
//! This crate defines the storage port the document graph is written
//! against, plus an in-memory backend used by tests and by the CLI (which
//! persists it as a JSON snapshot).
//!
//! # Table Layout
//!
//! Each [`DocumentRow`] is keyed by a monotonic primary key and reachable
//! through three secondary indices:
//!
//! - `by_hash` -- unique, the content address
//! - `by_creator` -- non-unique, the creator's raw name value
//! - `by_created` -- non-unique, creation time in whole seconds
//!
//! # Storage Backends
//!
//! All backends implement the [`DocumentTable`] trait:
//!
//! - [`InMemoryDocumentTable`] -- `BTreeMap`-based table with undo-log rollback
//!
//! # Design Rules
//!
//! 1. Every mutation goes through [`DocumentTable::apply`] as a [`WriteBatch`].
//! 2. A batch applies completely or not at all.
//! 3. The hash index is unique: inserting a second row with the same hash fails.
//! 4. A row's hash and content are never rewritten after insertion.
//! 5. Primary keys are never reused, even after an erase.

pub mod batch;
pub mod error;
pub mod memory;
pub mod row;
pub mod snapshot;
pub mod traits;

pub use batch::{WriteBatch, WriteOp};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryDocumentTable;
pub use row::DocumentRow;
pub use traits::DocumentTable;
