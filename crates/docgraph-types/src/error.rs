use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid asset {0:?}")]
    InvalidAsset(String),

    #[error("invalid symbol {0:?}")]
    InvalidSymbol(String),

    #[error("invalid time point {0:?}")]
    InvalidTimePoint(String),
}
