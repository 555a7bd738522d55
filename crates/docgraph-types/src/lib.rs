//! Foundation types for docgraph.
//!
//! This crate provides the primitive value types that documents are built
//! from. Every other docgraph crate depends on `docgraph-types`.
//!
//! # Key Types
//!
//! - [`Checksum256`] -- 256-bit content digest (BLAKE3), the external handle of a document
//! - [`Name`] -- namespaced 64-bit account identifier used as a document creator
//! - [`TimePoint`] -- microsecond-precision UTC timestamp
//! - [`Asset`] -- fixed-precision decimal amount with a currency [`Symbol`]

pub mod asset;
pub mod checksum;
pub mod error;
pub mod name;
pub mod time;

pub use asset::{Asset, Symbol};
pub use checksum::Checksum256;
pub use error::TypeError;
pub use name::Name;
pub use time::TimePoint;
