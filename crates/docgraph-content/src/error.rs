/// Errors from content queries and typed value access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// No group carries the requested `content_group_label`.
    #[error("no content group with label found: {0}")]
    GroupNotFound(String),

    /// The group exists but has no content with the label (strict lookups only).
    #[error("no content labeled {label:?} in group {group:?}")]
    ContentNotFound { group: String, label: String },

    /// A value had a different type than the consumer expected.
    #[error("invalid value: expected {expected}, found {found}")]
    InvalidValue {
        expected: &'static str,
        found: &'static str,
    },
}

/// Result alias for content operations.
pub type ContentResult<T> = Result<T, ContentError>;
