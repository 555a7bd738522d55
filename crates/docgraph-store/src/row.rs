use docgraph_content::ContentGroups;
use docgraph_types::{Checksum256, Name, TimePoint};
use serde::{Deserialize, Serialize};

/// A persisted document as the table stores it.
///
/// Field names match the JSON form of historical document dumps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub id: u64,
    pub hash: Checksum256,
    pub creator: Name,
    pub content_groups: ContentGroups,
    pub created_date: TimePoint,
}

impl DocumentRow {
    pub fn primary_key(&self) -> u64 {
        self.id
    }

    pub fn by_hash(&self) -> Checksum256 {
        self.hash
    }

    pub fn by_creator(&self) -> u64 {
        self.creator.value()
    }

    pub fn by_created(&self) -> i64 {
        self.created_date.sec_since_epoch()
    }
}
