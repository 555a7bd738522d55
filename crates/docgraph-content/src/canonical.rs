//! Canonical rendering and hashing of content groups.
//!
//! The canonical form is the only input to a document hash:
//!
//! ```text
//! content  = "{" label "=[" type "," value "]}"
//! group    = "[" content ("," content)* "]"
//! document = "[" group ("," group)* "]"
//! ```
//!
//! Every value carries its type tag, so values of different types never
//! render the same. Labels and string values escape `\ , = [ ] { }` with a
//! backslash. Group and content order are preserved as given: reordering
//! changes the hash.

use docgraph_types::Checksum256;

use crate::content::{Content, ContentGroup};
use crate::value::FlexValue;

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        if matches!(c, '\\' | ',' | '=' | '[' | ']' | '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
}

fn push_value(out: &mut String, value: &FlexValue) {
    match value {
        FlexValue::Empty => {}
        FlexValue::String(s) => push_escaped(out, s),
        FlexValue::Int64(v) => out.push_str(&v.to_string()),
        FlexValue::Asset(a) => out.push_str(&a.to_string()),
        FlexValue::Name(n) => out.push_str(&n.to_string()),
        FlexValue::Checksum256(c) => out.push_str(&c.to_hex()),
        FlexValue::Bytes(b) => out.push_str(&hex::encode(b)),
        FlexValue::TimePoint(t) => out.push_str(&t.micros().to_string()),
    }
}

fn push_content(out: &mut String, content: &Content) {
    out.push('{');
    push_escaped(out, &content.label);
    out.push_str("=[");
    out.push_str(content.value.type_name());
    out.push(',');
    push_value(out, &content.value);
    out.push_str("]}");
}

fn push_group(out: &mut String, group: &[Content]) {
    out.push('[');
    for (i, content) in group.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_content(out, content);
    }
    out.push(']');
}

/// Render a single content item.
pub fn render_content(content: &Content) -> String {
    let mut out = String::new();
    push_content(&mut out, content);
    out
}

/// Render one group.
pub fn render_group(group: &[Content]) -> String {
    let mut out = String::new();
    push_group(&mut out, group);
    out
}

/// Render a full list of groups.
pub fn render_groups(groups: &[ContentGroup]) -> String {
    let mut out = String::from("[");
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_group(&mut out, group);
    }
    out.push(']');
    out
}

/// Digest of the canonical rendering.
pub fn hash_groups(groups: &[ContentGroup]) -> Checksum256 {
    Checksum256::digest(render_groups(groups).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgraph_types::{Asset, Name, TimePoint};
    use proptest::prelude::*;

    fn details(title: &str) -> ContentGroup {
        vec![Content::group_label("details"), Content::new("title", title)]
    }

    #[test]
    fn renders_reference_document() {
        let groups = vec![details("Hello")];
        assert_eq!(
            render_groups(&groups),
            "[[{content_group_label=[string,details]},{title=[string,Hello]}]]"
        );
    }

    #[test]
    fn renders_every_type() {
        let group = vec![
            Content::new("s", "x"),
            Content::new("i", -42i64),
            Content::new("a", "130.00 USD".parse::<Asset>().unwrap()),
            Content::new("n", "alice".parse::<Name>().unwrap()),
            Content::new("c", Checksum256::from_hash([0x11; 32])),
            Content::new("b", vec![0xca, 0xfe]),
            Content::new("t", TimePoint::from_micros(1_500)),
            Content::default(),
        ];
        let expected = format!(
            "[{{s=[string,x]}},{{i=[int64,-42]}},{{a=[asset,130.00 USD]}},{{n=[name,alice]}},\
             {{c=[checksum256,{}]}},{{b=[bytes,cafe]}},{{t=[time_point,1500]}},{{=[monostate,]}}]",
            "11".repeat(32)
        );
        assert_eq!(render_group(&group), expected);
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(render_groups(&[]), "[]");
        assert_eq!(render_groups(&[vec![]]), "[[]]");
    }

    #[test]
    fn types_never_collide() {
        let as_string = vec![vec![Content::new("v", "42")]];
        let as_int = vec![vec![Content::new("v", 42i64)]];
        assert_ne!(hash_groups(&as_string), hash_groups(&as_int));
    }

    #[test]
    fn delimiters_are_escaped() {
        // Without escaping both would render as {a=[string,b]},{c=[string,d]}.
        let one = vec![vec![Content::new("a", "b]},{c=[string,d")]];
        let two = vec![vec![Content::new("a", "b"), Content::new("c", "d")]];
        assert_ne!(render_groups(&one), render_groups(&two));
        assert_ne!(hash_groups(&one), hash_groups(&two));
    }

    #[test]
    fn group_order_changes_hash() {
        let a = vec![details("one"), details("two")];
        let b = vec![details("two"), details("one")];
        assert_ne!(hash_groups(&a), hash_groups(&b));
    }

    #[test]
    fn content_order_changes_hash() {
        let a = vec![vec![Content::new("x", 1i64), Content::new("y", 2i64)]];
        let b = vec![vec![Content::new("y", 2i64), Content::new("x", 1i64)]];
        assert_ne!(hash_groups(&a), hash_groups(&b));
    }

    #[test]
    fn grouping_changes_hash() {
        let merged = vec![vec![Content::new("x", 1i64), Content::new("y", 2i64)]];
        let split = vec![vec![Content::new("x", 1i64)], vec![Content::new("y", 2i64)]];
        assert_ne!(hash_groups(&merged), hash_groups(&split));
    }

    proptest! {
        #[test]
        fn hash_is_deterministic(labels in proptest::collection::vec("[a-z_]{1,12}", 1..6), text in ".*") {
            let group: ContentGroup = labels
                .iter()
                .map(|label| Content::new(label.clone(), text.clone()))
                .collect();
            let groups = vec![group];
            prop_assert_eq!(hash_groups(&groups), hash_groups(&groups.clone()));
        }

        #[test]
        fn swapping_distinct_contents_changes_hash(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
            prop_assume!(a != b);
            let forward = vec![vec![Content::new(a.clone(), 1i64), Content::new(b.clone(), 2i64)]];
            let reverse = vec![vec![Content::new(b, 2i64), Content::new(a, 1i64)]];
            prop_assert_ne!(hash_groups(&forward), hash_groups(&reverse));
        }
    }
}
