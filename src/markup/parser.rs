//! Stack-based construction of the EggsML tree.

use log::{debug, trace};

use super::{
    error::{MarkupError, MarkupErrorKind},
    node::{Node, Tag, Text},
    scanning::{is_always_closing, is_special, opposite, run_length, scan_quoted},
};

/// A tag whose closing delimiter has not been seen yet.
struct OpenTag {
    tag: Option<char>,
    index: usize,
    children: Vec<Node>,
}

impl OpenTag {
    fn new(tag: Option<char>, index: usize) -> Self {
        Self {
            tag,
            index,
            children: Vec::new(),
        }
    }

    fn closer(&self) -> Option<char> {
        self.tag.map(opposite)
    }

    fn into_node(self) -> Node {
        Node::Tag(Tag::new(self.tag, self.children, self.index))
    }
}

/// Literal text waiting to be attached to the innermost open tag.
#[derive(Default)]
struct PendingText {
    text: String,
    index: usize,
}

impl PendingText {
    fn push(&mut self, at: usize, ch: char, count: usize) {
        if self.text.is_empty() {
            self.index = at;
        }
        self.text.extend(std::iter::repeat_n(ch, count));
    }

    fn push_str(&mut self, at: usize, s: &str) {
        if self.text.is_empty() {
            self.index = at;
        }
        self.text.push_str(s);
    }

    fn flush_into(&mut self, tag: &mut OpenTag) {
        if self.text.is_empty() {
            return;
        }
        tag.children
            .push(Node::Text(Text::new(std::mem::take(&mut self.text), self.index)));
    }
}

struct Parser {
    chars: Vec<char>,
    /// Open tags; the synthetic root sits at the bottom and is never popped.
    stack: Vec<OpenTag>,
    pending: PendingText,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            stack: vec![OpenTag::new(None, 0)],
            pending: PendingText::default(),
        }
    }

    fn current(&mut self) -> &mut OpenTag {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn open(&mut self, tag: char, index: usize) {
        trace!("opening {tag:?} tag at {index}");
        let mut pending = std::mem::take(&mut self.pending);
        pending.flush_into(self.current());
        self.stack.push(OpenTag::new(Some(tag), index));
    }

    fn close(&mut self, index: usize) {
        let mut pending = std::mem::take(&mut self.pending);
        pending.flush_into(self.current());
        if let Some(closed) = self.stack.pop() {
            trace!("closing {:?} tag from {} at {index}", closed.tag, closed.index);
            self.current().children.push(closed.into_node());
        }
    }

    fn run(mut self) -> Result<Node, MarkupError> {
        let mut i = 0;
        while i < self.chars.len() {
            let ch = self.chars[i];
            if !is_special(ch) {
                self.pending.push(i, ch, 1);
                i += 1;
                continue;
            }

            let run = run_length(&self.chars, i);
            if run % 2 == 0 {
                self.pending.push(i, ch, run / 2);
                i += run;
            } else if ch == '"' {
                i = self.quoted(i)?;
            } else if run > 3 {
                return Err(MarkupError::new(
                    MarkupErrorKind::MalformedRun,
                    format!(
                        "Ambiguous run of {run} '{ch}' characters; use an even number for \
                         literals or separate the tag delimiters with '`'"
                    ),
                    i,
                    run,
                ));
            } else if run == 3 {
                if is_always_closing(ch) || ch == '`' {
                    return Err(MarkupError::new(
                        MarkupErrorKind::InvalidTripling,
                        format!("'{ch}' cannot be tripled"),
                        i,
                        3,
                    ));
                }
                self.open(ch, i);
                i += 3;
            } else {
                self.single(ch, i)?;
                i += 1;
            }
        }

        if self.stack.len() > 1 {
            let open = &self.stack[self.stack.len() - 1];
            let tag = open.tag.unwrap_or_default();
            return Err(MarkupError::new(
                MarkupErrorKind::UnterminatedTag,
                format!(
                    "Tag '{tag}' is not closed; expected '{}' before the end of the input",
                    opposite(tag)
                ),
                self.chars.len(),
                0,
            )
            .with_first_index(Some(open.index)));
        }

        let mut pending = std::mem::take(&mut self.pending);
        pending.flush_into(self.current());
        let root = self.stack.pop().map_or_else(
            || Node::Tag(Tag::new(None, Vec::new(), 0)),
            OpenTag::into_node,
        );
        debug!("parsed EggsML into {} nodes", root.count());
        Ok(root)
    }

    /// Resolve a lone special character at `index`.
    fn single(&mut self, ch: char, index: usize) -> Result<(), MarkupError> {
        if ch == '`' {
            return Ok(());
        }
        if self.current().closer() == Some(ch) {
            self.close(index);
            return Ok(());
        }
        if is_always_closing(ch) {
            let current = self.current();
            let (message, first_index) = match current.tag {
                Some(tag) => (
                    format!(
                        "Unexpected '{ch}'; the '{tag}' tag opened at index {} expects '{}'",
                        current.index,
                        opposite(tag)
                    ),
                    Some(current.index),
                ),
                None => (format!("Unexpected '{ch}' with no matching open tag"), None),
            };
            return Err(
                MarkupError::new(MarkupErrorKind::UnexpectedCharacter, message, index, 1)
                    .with_first_index(first_index),
            );
        }
        self.open(ch, index);
        Ok(())
    }

    /// Decode the quoted literal starting at `index`; returns the index after it.
    fn quoted(&mut self, index: usize) -> Result<usize, MarkupError> {
        let Some((content, end)) = scan_quoted(&self.chars, index) else {
            return Err(MarkupError::new(
                MarkupErrorKind::UnterminatedQuote,
                "Quoted literal is not closed; expected a '\"' that is not doubled",
                index,
                self.chars.len() - index,
            ));
        };
        self.pending.push_str(index, &content);
        Ok(end)
    }
}

/// Parse EggsML markup into a tree rooted at a tag with no character.
///
/// # Errors
/// Returns a [`MarkupError`] describing the first malformed construct.
///
/// # Examples
///
/// ```
/// use eggsml::markup::parse;
///
/// let root = parse("*bold* text").unwrap();
/// assert_eq!(root.to_plain_text(), "bold text");
/// ```
pub fn parse(input: &str) -> Result<Node, MarkupError> {
    Parser::new(input).run()
}
