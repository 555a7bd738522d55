use std::fmt;

use serde::{Deserialize, Serialize};

use crate::canonical;
use crate::value::FlexValue;

/// Reserved label whose string value names a content group.
pub const CONTENT_GROUP_LABEL: &str = "content_group_label";

/// One labeled, typed value.
///
/// `Content::default()` (empty label, [`FlexValue::Empty`]) is the sentinel
/// returned by lenient lookups when a label is absent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Content {
    pub label: String,
    pub value: FlexValue,
}

impl Content {
    pub fn new(label: impl Into<String>, value: impl Into<FlexValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A `content_group_label` item naming a group.
    pub fn group_label(name: impl Into<String>) -> Self {
        Self::new(CONTENT_GROUP_LABEL, FlexValue::String(name.into()))
    }

    /// Returns `true` for the lenient-lookup sentinel.
    pub fn is_empty(&self) -> bool {
        self.label.is_empty() && self.value.is_empty()
    }
}

/// Canonical rendering: `{label=[type,value]}`.
impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&canonical::render_content(self))
    }
}

/// Ordered list of contents. Labels are not required to be unique.
pub type ContentGroup = Vec<Content>;

/// Ordered list of groups. Order participates in the document hash.
pub type ContentGroups = Vec<ContentGroup>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_sentinel() {
        let sentinel = Content::default();
        assert!(sentinel.is_empty());
        assert!(!Content::new("title", "Hello").is_empty());
    }

    #[test]
    fn equality_includes_value_type() {
        assert_eq!(Content::new("n", 1i64), Content::new("n", 1i64));
        assert_ne!(Content::new("n", 1i64), Content::new("n", "1"));
        assert_ne!(Content::new("a", "x"), Content::new("b", "x"));
    }

    #[test]
    fn group_label_helper() {
        let c = Content::group_label("details");
        assert_eq!(c.label, CONTENT_GROUP_LABEL);
        assert_eq!(c.value.as_str().unwrap(), "details");
    }

    #[test]
    fn json_form() {
        let c = Content::new("title", "Healer");
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            json!({"label": "title", "value": ["string", "Healer"]})
        );
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(Content::new("title", "Hello").to_string(), "{title=[string,Hello]}");
    }
}
