use docgraph_content::ContentGroup;
use docgraph_types::Name;
use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, DocumentResult};

/// Configuration for a [`DocumentGraph`](crate::DocumentGraph).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Account that owns the document table. Recorded in logs.
    pub contract: Name,
    /// Shape limits checked before any content is hashed or stored.
    pub limits: ContentLimits,
}

/// Shape limits for incoming content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentLimits {
    pub max_groups: usize,
    pub max_contents_per_group: usize,
    pub max_label_len: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_groups: 64,
            max_contents_per_group: 256,
            max_label_len: 256,
        }
    }
}

impl ContentLimits {
    /// No limits beyond the structural checks.
    pub fn unbounded() -> Self {
        Self {
            max_groups: usize::MAX,
            max_contents_per_group: usize::MAX,
            max_label_len: usize::MAX,
        }
    }

    /// Reject content that cannot be stored.
    ///
    /// Every label must be non-empty and within `max_label_len`, and no value
    /// may be the empty sentinel. Group labels are not checked here.
    pub fn check(&self, groups: &[ContentGroup]) -> DocumentResult<()> {
        if groups.len() > self.max_groups {
            return Err(DocumentError::MalformedContent(format!(
                "{} content groups exceed the limit of {}",
                groups.len(),
                self.max_groups
            )));
        }
        for (g, group) in groups.iter().enumerate() {
            if group.len() > self.max_contents_per_group {
                return Err(DocumentError::MalformedContent(format!(
                    "group {g} has {} contents, limit is {}",
                    group.len(),
                    self.max_contents_per_group
                )));
            }
            for (c, content) in group.iter().enumerate() {
                if content.label.is_empty() {
                    return Err(DocumentError::MalformedContent(format!(
                        "group {g} content {c} has an empty label"
                    )));
                }
                if content.label.len() > self.max_label_len {
                    return Err(DocumentError::MalformedContent(format!(
                        "group {g} content {c} label exceeds {} bytes",
                        self.max_label_len
                    )));
                }
                if content.value.is_empty() {
                    return Err(DocumentError::MalformedContent(format!(
                        "content {:?} in group {g} has no value",
                        content.label
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgraph_content::{Content, FlexValue};

    #[test]
    fn default_config() {
        let c = GraphConfig::default();
        assert!(c.contract.is_empty());
        assert_eq!(c.limits.max_groups, 64);
        assert_eq!(c.limits.max_contents_per_group, 256);
        assert_eq!(c.limits.max_label_len, 256);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c: GraphConfig = toml::from_str(
            r#"
            contract = "docs"
            [limits]
            max_groups = 2
            "#,
        )
        .unwrap();
        assert_eq!(c.contract.to_string(), "docs");
        assert_eq!(c.limits.max_groups, 2);
        assert_eq!(c.limits.max_label_len, 256);
    }

    #[test]
    fn accepts_ordinary_content() {
        let groups = vec![vec![Content::group_label("details"), Content::new("title", "x")]];
        assert!(ContentLimits::default().check(&groups).is_ok());
        assert!(ContentLimits::default().check(&vec![]).is_ok());
    }

    #[test]
    fn rejects_too_many_groups() {
        let limits = ContentLimits {
            max_groups: 1,
            ..ContentLimits::default()
        };
        let groups = vec![vec![Content::new("a", 1i64)], vec![Content::new("b", 2i64)]];
        assert!(matches!(
            limits.check(&groups),
            Err(DocumentError::MalformedContent(_))
        ));
    }

    #[test]
    fn rejects_empty_label_and_empty_value() {
        let limits = ContentLimits::unbounded();
        assert!(limits.check(&vec![vec![Content::new("", 1i64)]]).is_err());
        assert!(limits
            .check(&vec![vec![Content::new("x", FlexValue::Empty)]])
            .is_err());
    }

    #[test]
    fn rejects_long_labels() {
        let limits = ContentLimits {
            max_label_len: 4,
            ..ContentLimits::default()
        };
        assert!(limits.check(&vec![vec![Content::new("toolong", 1i64)]]).is_err());
    }
}
