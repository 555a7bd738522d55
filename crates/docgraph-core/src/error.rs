use docgraph_content::ContentError;
use docgraph_store::StoreError;
use docgraph_types::Checksum256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// A document with this content is already stored.
    #[error("document exists already: {hash}")]
    AlreadyExists { hash: Checksum256 },

    #[error("document not found: {0}")]
    DocumentNotFound(Checksum256),

    /// The content stored under `expected` hashes to something else.
    #[error("fatal error: indexed hash {expected} does not match recomputed hash {computed}")]
    Corruption {
        expected: Checksum256,
        computed: Checksum256,
    },

    /// A serialized document whose fields describe no valid lifecycle state.
    #[error("invalid document record: {0}")]
    InvalidRecord(&'static str),

    #[error("malformed content: {0}")]
    MalformedContent(String),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type DocumentResult<T> = Result<T, DocumentError>;
