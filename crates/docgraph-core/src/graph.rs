use docgraph_store::DocumentTable;
use docgraph_types::{Checksum256, Name, TimePoint};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::GraphConfig;
use crate::document::{Document, DocumentContent};
use crate::error::DocumentResult;

/// Document operations over one indexed table.
///
/// The graph owns its table, a clock for `created_date`, and the content
/// limits that every input passes before it is hashed.
pub struct DocumentGraph<T: DocumentTable> {
    table: T,
    config: GraphConfig,
    clock: Box<dyn Clock>,
}

impl<T: DocumentTable> DocumentGraph<T> {
    pub fn new(table: T) -> Self {
        Self::with_config(table, GraphConfig::default())
    }

    pub fn with_config(table: T, config: GraphConfig) -> Self {
        Self {
            table,
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used to stamp new documents.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn into_table(self) -> T {
        self.table
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ---- Writes ----

    /// Store new content. Fails with `AlreadyExists` if the content is
    /// already stored, whoever created it.
    pub fn create_document(
        &self,
        creator: Name,
        content: impl Into<DocumentContent>,
    ) -> DocumentResult<Document> {
        let groups = content.into().into_groups();
        self.config.limits.check(&groups)?;

        let mut document = Document::new(creator, groups);
        document.emplace(&self.table, self.clock.as_ref())?;
        info!(
            contract = %self.config.contract,
            id = document.id(),
            hash = %document.hash(),
            creator = %creator,
            "document created"
        );
        Ok(document)
    }

    /// Emplace a document built elsewhere.
    pub fn persist(&self, document: &mut Document) -> DocumentResult<()> {
        self.config.limits.check(document.content_groups())?;
        document.emplace(&self.table, self.clock.as_ref())?;
        info!(
            contract = %self.config.contract,
            id = document.id(),
            hash = %document.hash(),
            "document persisted"
        );
        Ok(())
    }

    /// Return the stored document for this content, creating it first when
    /// it is new. Calling this twice with the same content assigns one id.
    pub fn get_or_create(
        &self,
        creator: Name,
        content: impl Into<DocumentContent>,
    ) -> DocumentResult<Document> {
        let mut document = self.get_or_new(creator, content)?;
        if !document.is_persisted() {
            self.persist(&mut document)?;
        }
        Ok(document)
    }

    // ---- Reads ----

    /// Resolve content to its stored identity, or a transient document when
    /// the content is new. Never writes.
    pub fn get_or_new(
        &self,
        creator: Name,
        content: impl Into<DocumentContent>,
    ) -> DocumentResult<Document> {
        let groups = content.into().into_groups();
        self.config.limits.check(&groups)?;
        Document::get_or_new(&self.table, creator, groups)
    }

    pub fn load_by_hash(&self, hash: &Checksum256) -> DocumentResult<Document> {
        Document::load(&self.table, hash)
    }

    pub fn get_by_id(&self, id: u64) -> DocumentResult<Option<Document>> {
        self.table.get(id)?.map(Document::from_row).transpose()
    }

    /// Documents by `creator`, in id order.
    pub fn documents_by_creator(&self, creator: Name) -> DocumentResult<Vec<Document>> {
        self.table
            .scan_by_creator(creator)?
            .into_iter()
            .map(Document::from_row)
            .collect()
    }

    /// Documents whose creation second lies in `from..=to`, oldest first.
    pub fn documents_created_between(
        &self,
        from: TimePoint,
        to: TimePoint,
    ) -> DocumentResult<Vec<Document>> {
        self.table
            .scan_by_created(from.sec_since_epoch(), to.sec_since_epoch())?
            .into_iter()
            .map(Document::from_row)
            .collect()
    }

    /// Recompute the hash of every stored document.
    ///
    /// Returns the number of documents checked, or the first corruption.
    pub fn verify_all(&self) -> DocumentResult<usize> {
        let rows = self.table.rows()?;
        let count = rows.len();
        for row in rows {
            let id = row.id;
            if let Err(e) = Document::from_row(row) {
                warn!(contract = %self.config.contract, id, "verification failed");
                return Err(e);
            }
        }
        debug!(contract = %self.config.contract, count, "all documents verified");
        Ok(count)
    }

    pub fn len(&self) -> DocumentResult<usize> {
        Ok(self.table.len()?)
    }

    pub fn is_empty(&self) -> DocumentResult<bool> {
        Ok(self.table.is_empty()?)
    }
}

impl<T: DocumentTable + std::fmt::Debug> std::fmt::Debug for DocumentGraph<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentGraph")
            .field("table", &self.table)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
