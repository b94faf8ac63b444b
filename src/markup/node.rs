//! The immutable tree produced by [`parse`](super::parse).

use std::fmt;

/// A node in a parsed EggsML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A tag with its children, or the document root.
    Tag(Tag),
    /// Literal text with all escapes resolved.
    Text(Text),
}

/// A tag and its ordered children.
///
/// The synthetic root returned by the parser is the only tag whose character
/// is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    tag: Option<char>,
    children: Vec<Node>,
    index: usize,
}

/// A run of literal text. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: String,
    index: usize,
}

impl Tag {
    pub(crate) fn new(tag: Option<char>, children: Vec<Node>, index: usize) -> Self {
        Self {
            tag,
            children,
            index,
        }
    }

    /// The tag's opening character, or `None` for the root.
    #[must_use]
    pub fn tag(&self) -> Option<char> {
        self.tag
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Character offset of the opening run in the input.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Text {
    pub(crate) fn new(text: String, index: usize) -> Self {
        debug_assert!(!text.is_empty(), "text nodes are never empty");
        Self { text, index }
    }

    /// The unescaped text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character offset in the input where the text starts.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Node {
    /// Index of the character in the source where this node begins.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Node::Tag(tag) => tag.index,
            Node::Text(text) => text.index,
        }
    }

    #[must_use]
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Node::Tag(tag) => Some(tag),
            Node::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text.text()),
            Node::Tag(_) => None,
        }
    }

    /// Whether this is a tag without children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Tag(tag) if tag.children.is_empty())
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Node::Tag(tag) => 1 + tag.children.iter().map(Node::count).sum::<usize>(),
            Node::Text(_) => 1,
        }
    }

    /// Concatenate the text of this subtree, discarding all tags.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Node::Tag(tag) => {
                for child in &tag.children {
                    child.push_plain_text(out);
                }
            }
            Node::Text(text) => out.push_str(&text.text),
        }
    }

    /// Regenerate EggsML markup equivalent to this subtree.
    ///
    /// Parsing the result yields a tree with the same tags and text, though
    /// not necessarily the exact input this tree was parsed from.
    #[must_use]
    pub fn to_markup_text(&self) -> String {
        super::escape::to_markup_text(self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup_text())
    }
}
