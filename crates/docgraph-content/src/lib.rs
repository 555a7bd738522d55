//! Labeled content model for docgraph.
//!
//! A document's payload is an ordered list of [`ContentGroup`]s, each an
//! ordered list of labeled, typed [`Content`] items. Groups are addressed by
//! the value of their reserved [`CONTENT_GROUP_LABEL`] item rather than by
//! position.
//!
//! # Components
//!
//! - [`FlexValue`] -- the tagged value union (string, int64, asset, name, checksum, bytes, time point)
//! - [`Content`] -- one label/value pair
//! - [`ContentWrapper`] -- label-based query engine over borrowed content groups
//! - [`canonical`] -- deterministic rendering and hashing of content groups
//!
//! # Lookup strictness
//!
//! Group lookups fail with [`ContentError::GroupNotFound`]. Content lookups
//! inside a found group are lenient: [`ContentWrapper::get_content`] returns
//! [`Content::default()`] and [`ContentWrapper::exists`] returns `false` when
//! the label is absent. Strict variants are provided separately.

pub mod canonical;
pub mod content;
pub mod error;
pub mod value;
pub mod wrapper;

pub use canonical::{hash_groups, render_group, render_groups};
pub use content::{Content, ContentGroup, ContentGroups, CONTENT_GROUP_LABEL};
pub use error::{ContentError, ContentResult};
pub use value::FlexValue;
pub use wrapper::ContentWrapper;
