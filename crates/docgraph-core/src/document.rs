use std::fmt;

use docgraph_content::{
    hash_groups, render_groups, Content, ContentGroup, ContentGroups, ContentWrapper, FlexValue,
};
use docgraph_store::{DocumentRow, DocumentTable, StoreError};
use docgraph_types::{Checksum256, Name, TimePoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::{DocumentError, DocumentResult};

/// The accepted shapes of document content.
///
/// Anything short of a full group list is rolled up: a single group becomes
/// a one-group list, a single content (or label/value pair) becomes a
/// one-group list holding one content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentContent {
    Groups(ContentGroups),
    Group(ContentGroup),
    Item(Content),
}

impl DocumentContent {
    pub fn into_groups(self) -> ContentGroups {
        match self {
            Self::Groups(groups) => groups,
            Self::Group(group) => vec![group],
            Self::Item(content) => vec![vec![content]],
        }
    }
}

impl From<ContentGroups> for DocumentContent {
    fn from(groups: ContentGroups) -> Self {
        Self::Groups(groups)
    }
}

impl From<ContentGroup> for DocumentContent {
    fn from(group: ContentGroup) -> Self {
        Self::Group(group)
    }
}

impl From<Content> for DocumentContent {
    fn from(content: Content) -> Self {
        Self::Item(content)
    }
}

impl<L: Into<String>, V: Into<FlexValue>> From<(L, V)> for DocumentContent {
    fn from((label, value): (L, V)) -> Self {
        Self::Item(Content::new(label, value))
    }
}

/// A content-addressed document.
///
/// `hash` is computed from `content_groups` at construction and the two never
/// change afterwards. `id` and `created_date` stay `None` until the document
/// is stored; only [`Document::emplace`] (or a lookup of an existing row)
/// sets them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRecord")]
pub struct Document {
    id: Option<u64>,
    hash: Checksum256,
    creator: Name,
    content_groups: ContentGroups,
    created_date: Option<TimePoint>,
}

impl Document {
    /// Build a transient document and compute its hash.
    pub fn new(creator: Name, content: impl Into<DocumentContent>) -> Self {
        let content_groups = content.into().into_groups();
        let hash = hash_groups(&content_groups);
        Self {
            id: None,
            hash,
            creator,
            content_groups,
            created_date: None,
        }
    }

    /// Load the stored document with this hash.
    ///
    /// Fails with [`DocumentError::DocumentNotFound`] when the hash index has
    /// no entry, and with [`DocumentError::Corruption`] when the stored
    /// content no longer hashes to the requested value.
    pub fn load<T: DocumentTable + ?Sized>(table: &T, hash: &Checksum256) -> DocumentResult<Self> {
        let row = table
            .find_by_hash(hash)?
            .ok_or(DocumentError::DocumentNotFound(*hash))?;
        Self::verified(row, *hash)
    }

    /// Rebuild a document from a stored row, checking the row's own hash.
    pub fn from_row(row: DocumentRow) -> DocumentResult<Self> {
        let expected = row.hash;
        Self::verified(row, expected)
    }

    fn verified(row: DocumentRow, expected: Checksum256) -> DocumentResult<Self> {
        let computed = hash_groups(&row.content_groups);
        if computed != expected {
            warn!(
                id = row.id,
                expected = %expected.short_hex(),
                computed = %computed.short_hex(),
                "stored document fails hash verification"
            );
            return Err(DocumentError::Corruption { expected, computed });
        }
        Ok(Self {
            id: Some(row.id),
            hash: computed,
            creator: row.creator,
            content_groups: row.content_groups,
            created_date: Some(row.created_date),
        })
    }

    /// Store this document under the next free id and the clock's time.
    ///
    /// Never returns an existing row: if the hash is already indexed this
    /// fails with [`DocumentError::AlreadyExists`] carrying that hash, and
    /// the table is left untouched.
    pub fn emplace<T: DocumentTable + ?Sized>(
        &mut self,
        table: &T,
        clock: &dyn Clock,
    ) -> DocumentResult<()> {
        if table.find_by_hash(&self.hash)?.is_some() {
            warn!(hash = %self.hash.short_hex(), "document exists already");
            return Err(DocumentError::AlreadyExists { hash: self.hash });
        }

        // The id is chosen inside the table's write, and the hash index is
        // checked again there, so a writer that slipped in after the lookup
        // above surfaces as AlreadyExists rather than a key clash.
        let created_date = clock.now();
        let id = table
            .insert_new(
                self.hash,
                self.creator,
                self.content_groups.clone(),
                created_date,
            )
            .map_err(|e| match e {
                StoreError::DuplicateHash(hash) => DocumentError::AlreadyExists { hash },
                other => other.into(),
            })?;

        self.id = Some(id);
        self.created_date = Some(created_date);
        debug!(id, hash = %self.hash.short_hex(), creator = %self.creator, "document emplaced");
        Ok(())
    }

    /// Resolve content to its stored identity without writing anything.
    ///
    /// On a hash hit the result carries the caller's content but the stored
    /// row's `id`, `creator` and `created_date`: the first writer stays the
    /// creator of record. On a miss the result is a transient document owned
    /// by `creator`.
    pub fn get_or_new<T: DocumentTable + ?Sized>(
        table: &T,
        creator: Name,
        content: impl Into<DocumentContent>,
    ) -> DocumentResult<Self> {
        let mut document = Self::new(creator, content);
        if let Some(row) = table.find_by_hash(&document.hash)? {
            debug!(id = row.id, hash = %document.hash.short_hex(), "content already stored");
            document.id = Some(row.id);
            document.creator = row.creator;
            document.created_date = Some(row.created_date);
        }
        Ok(document)
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn hash(&self) -> &Checksum256 {
        &self.hash
    }

    pub fn creator(&self) -> Name {
        self.creator
    }

    pub fn content_groups(&self) -> &ContentGroups {
        &self.content_groups
    }

    pub fn created_date(&self) -> Option<TimePoint> {
        self.created_date
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Query engine over this document's content.
    pub fn wrapper(&self) -> ContentWrapper<'_> {
        ContentWrapper::new(&self.content_groups)
    }

    /// The canonical string the hash is computed from.
    pub fn canonical_string(&self) -> String {
        render_groups(&self.content_groups)
    }

    /// Recompute the hash and compare it with the cached one.
    pub fn verify(&self) -> DocumentResult<()> {
        let computed = hash_groups(&self.content_groups);
        if computed != self.hash {
            return Err(DocumentError::Corruption {
                expected: self.hash,
                computed,
            });
        }
        Ok(())
    }

    pub fn into_content_groups(self) -> ContentGroups {
        self.content_groups
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

/// Wire form of a document; converted through hash verification.
#[derive(Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    id: Option<u64>,
    hash: Checksum256,
    creator: Name,
    content_groups: ContentGroups,
    #[serde(default)]
    created_date: Option<TimePoint>,
}

impl TryFrom<DocumentRecord> for Document {
    type Error = DocumentError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        if record.id.is_some() != record.created_date.is_some() {
            return Err(DocumentError::InvalidRecord(
                "id and created_date must be both set or both unset",
            ));
        }
        let document = Self {
            id: record.id,
            hash: record.hash,
            creator: record.creator,
            content_groups: record.content_groups,
            created_date: record.created_date,
        };
        document.verify()?;
        Ok(document)
    }
}
