use docgraph_types::{Asset, Checksum256, Name, TimePoint};

use crate::content::{Content, ContentGroup, CONTENT_GROUP_LABEL};
use crate::error::{ContentError, ContentResult};

/// Label-based query engine over borrowed content groups.
///
/// Groups are found by the string value of their `content_group_label`
/// item; the first matching group wins. Within a group the first content
/// with a matching label wins.
#[derive(Clone, Copy, Debug)]
pub struct ContentWrapper<'a> {
    groups: &'a [ContentGroup],
}

impl<'a> ContentWrapper<'a> {
    pub fn new(groups: &'a [ContentGroup]) -> Self {
        Self { groups }
    }

    /// The wrapped groups.
    pub fn groups(&self) -> &'a [ContentGroup] {
        self.groups
    }

    /// Find the group whose `content_group_label` equals `group_label`.
    ///
    /// Fails with [`ContentError::GroupNotFound`] when no group matches, and
    /// with [`ContentError::InvalidValue`] if a `content_group_label` item
    /// scanned along the way is not a string.
    pub fn get_group(&self, group_label: &str) -> ContentResult<&'a ContentGroup> {
        for group in self.groups {
            for content in group {
                if content.label == CONTENT_GROUP_LABEL && content.value.as_str()? == group_label {
                    return Ok(group);
                }
            }
        }
        Err(ContentError::GroupNotFound(group_label.to_string()))
    }

    /// Find a content item, or the empty sentinel if the label is absent.
    ///
    /// Still fails if the group itself does not exist.
    pub fn get_content(&self, group_label: &str, content_label: &str) -> ContentResult<Content> {
        let group = self.get_group(group_label)?;
        Ok(find(group, content_label).cloned().unwrap_or_default())
    }

    /// Whether the group contains a content with this label.
    pub fn exists(&self, group_label: &str, content_label: &str) -> ContentResult<bool> {
        let group = self.get_group(group_label)?;
        Ok(find(group, content_label).is_some())
    }

    /// Strict lookup: fails with [`ContentError::ContentNotFound`] when absent.
    pub fn get_content_or_fail(
        &self,
        group_label: &str,
        content_label: &str,
    ) -> ContentResult<&'a Content> {
        let group = self.get_group(group_label)?;
        find(group, content_label).ok_or_else(|| ContentError::ContentNotFound {
            group: group_label.to_string(),
            label: content_label.to_string(),
        })
    }

    pub fn get_string(&self, group_label: &str, content_label: &str) -> ContentResult<&'a str> {
        self.get_content_or_fail(group_label, content_label)?
            .value
            .as_str()
    }

    pub fn get_int(&self, group_label: &str, content_label: &str) -> ContentResult<i64> {
        self.get_content_or_fail(group_label, content_label)?
            .value
            .as_int()
    }

    pub fn get_asset(&self, group_label: &str, content_label: &str) -> ContentResult<&'a Asset> {
        self.get_content_or_fail(group_label, content_label)?
            .value
            .as_asset()
    }

    pub fn get_name(&self, group_label: &str, content_label: &str) -> ContentResult<Name> {
        self.get_content_or_fail(group_label, content_label)?
            .value
            .as_name()
    }

    pub fn get_checksum(
        &self,
        group_label: &str,
        content_label: &str,
    ) -> ContentResult<&'a Checksum256> {
        self.get_content_or_fail(group_label, content_label)?
            .value
            .as_checksum()
    }

    pub fn get_time_point(&self, group_label: &str, content_label: &str) -> ContentResult<TimePoint> {
        self.get_content_or_fail(group_label, content_label)?
            .value
            .as_time_point()
    }

    /// Upsert by label inside one group.
    ///
    /// An existing content keeps its position and only its value changes;
    /// a new label is appended.
    pub fn insert_or_replace(group: &mut ContentGroup, content: Content) {
        match group.iter_mut().find(|c| c.label == content.label) {
            Some(existing) => existing.value = content.value,
            None => group.push(content),
        }
    }

    // ---- Convenience forms over caller-owned groups ----

    pub fn group_of(groups: &'a [ContentGroup], group_label: &str) -> ContentResult<&'a ContentGroup> {
        Self::new(groups).get_group(group_label)
    }

    pub fn content_of(
        groups: &[ContentGroup],
        group_label: &str,
        content_label: &str,
    ) -> ContentResult<Content> {
        ContentWrapper::new(groups).get_content(group_label, content_label)
    }

    pub fn exists_in(
        groups: &[ContentGroup],
        group_label: &str,
        content_label: &str,
    ) -> ContentResult<bool> {
        ContentWrapper::new(groups).exists(group_label, content_label)
    }
}

fn find<'g>(group: &'g [Content], label: &str) -> Option<&'g Content> {
    group.iter().find(|c| c.label == label)
}
