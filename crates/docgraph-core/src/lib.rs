//! Content-addressed document graph.
//!
//! A [`Document`] is a list of labeled content groups identified by the hash
//! of its canonical form. Identical content always resolves to the same
//! stored row: [`DocumentGraph::get_or_new`] and
//! [`DocumentGraph::get_or_create`] deduplicate through the table's unique
//! hash index, and the first writer stays the creator of record.
//!
//! ```no_run
//! use docgraph_core::DocumentGraph;
//! use docgraph_content::Content;
//! use docgraph_store::InMemoryDocumentTable;
//!
//! let graph = DocumentGraph::new(InMemoryDocumentTable::new());
//! let creator = "alice".parse().unwrap();
//! let doc = graph
//!     .get_or_create(creator, vec![Content::group_label("details"), Content::new("title", "Hello")])
//!     .unwrap();
//! assert_eq!(doc.wrapper().get_string("details", "title").unwrap(), "Hello");
//! ```

pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod graph;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ContentLimits, GraphConfig};
pub use document::{Document, DocumentContent};
pub use error::{DocumentError, DocumentResult};
pub use graph::DocumentGraph;
