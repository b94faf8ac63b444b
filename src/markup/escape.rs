//! Reconstruction of EggsML markup from a parsed tree.

use super::{
    node::Node,
    scanning::{is_special, opposite},
};

/// Escape `text` so that it parses back to a single literal run.
///
/// Every special character is doubled.
///
/// # Examples
///
/// ```
/// assert_eq!(eggsml::markup::escape("a*b"), "a**b");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        out.push(ch);
        if is_special(ch) {
            out.push(ch);
        }
    }
    out
}

/// Accumulates markup pieces, separating identical adjacent delimiters.
#[derive(Default)]
struct MarkupWriter {
    out: String,
}

impl MarkupWriter {
    fn push(&mut self, piece: &str) {
        let Some(first) = piece.chars().next() else {
            return;
        };
        // `*` followed by `*` would read as an escaped literal.
        if is_special(first) && self.out.ends_with(first) {
            self.out.push('`');
        }
        self.out.push_str(piece);
    }

    fn push_node(&mut self, node: &Node, parent: Option<char>) {
        match node {
            Node::Text(text) => self.push(&escape(text.text())),
            Node::Tag(tag) => {
                let Some(c) = tag.tag() else {
                    for child in tag.children() {
                        self.push_node(child, None);
                    }
                    return;
                };
                if parent.map(opposite) == Some(c) {
                    self.push(&c.to_string().repeat(3));
                } else {
                    self.push(&c.to_string());
                }
                for child in tag.children() {
                    self.push_node(child, Some(c));
                }
                self.push(&opposite(c).to_string());
            }
        }
    }
}

pub(super) fn to_markup_text(node: &Node) -> String {
    let mut writer = MarkupWriter::default();
    writer.push_node(node, None);
    writer.out
}
