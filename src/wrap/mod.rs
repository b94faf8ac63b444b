//! Word wrapping of EggsML trees.
//!
//! [`word_wrap`] walks a parsed tree depth-first and lays its text out in
//! lines no wider than a given width. It knows nothing about how text is
//! drawn: a [`WrapStrategy`] measures and renders text, starts new lines and
//! maps tags to formatting states. The state is threaded down the tree, so a
//! tag's formatting applies to exactly its subtree.
//!
//! Two tags are handled by the engine itself:
//!
//! - `+` makes its subtree unbreakable: whitespace inside it is rendered but
//!   never used as a wrap point.
//! - `<` captures the plain text of its subtree as a parameter for the tag
//!   that immediately follows it.

mod segment;
mod word_buffer;

use std::collections::VecDeque;

use log::{debug, trace};
use thiserror::Error;

pub use segment::is_wrap_point;
use segment::{Segment, segments};
use word_buffer::{Piece, WordBuffer};

use crate::markup::{Node, Tag};

/// Caller-supplied behaviour for [`word_wrap`].
///
/// Widths are in whatever unit the strategy chooses, as long as
/// [`measure`](Self::measure) and [`render`](Self::render) agree.
pub trait WrapStrategy {
    /// Formatting state threaded from each tag to its subtree.
    type State: Clone;

    /// Width of `text` when rendered in `state`.
    fn measure(&self, state: &Self::State, text: &str) -> usize;

    /// Output `text`, whose measured width is `width`, at the current position.
    fn render(&mut self, state: &Self::State, text: &str, width: usize);

    /// Start a new line and return the horizontal position it begins at.
    ///
    /// `new_paragraph` is `true` for line feeds in the text and `false` for
    /// wrapped lines. `indent` is the width of the current paragraph's
    /// leading whitespace; strategies add any hanging indent on top of it.
    fn advance_line(&mut self, state: &Self::State, new_paragraph: bool, indent: usize) -> usize;

    /// State for the subtree of a tag with character `tag`.
    ///
    /// `parameter` carries the text of a `<...>` tag directly preceding this
    /// one. The returned width is added to the horizontal position, for
    /// markers that take up room on the line.
    fn next_state(
        &mut self,
        state: &Self::State,
        tag: char,
        parameter: Option<&str>,
    ) -> (Self::State, usize) {
        let _ = (tag, parameter);
        (state.clone(), 0)
    }
}

/// Misuse of [`word_wrap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {
    #[error("wrap width must be greater than zero")]
    InvalidWrapWidth,
    #[error("parameter tag at index {index} must be immediately followed by another tag")]
    InvalidParameterUsage { index: usize },
}

/// Lay out `root` in lines at most `wrap_width` wide.
///
/// Returns the widest line position reached. Words wider than `wrap_width`
/// are split across lines, so a single line can only exceed the width when
/// a single character does, or when the indentation alone exceeds it.
///
/// # Errors
/// Returns [`WrapError::InvalidWrapWidth`] when `wrap_width` is zero and
/// [`WrapError::InvalidParameterUsage`] when a `<` tag is not immediately
/// followed by a tag that can consume its parameter.
pub fn word_wrap<W: WrapStrategy>(
    root: &Node,
    initial_state: W::State,
    wrap_width: usize,
    strategy: &mut W,
) -> Result<usize, WrapError> {
    if wrap_width == 0 {
        return Err(WrapError::InvalidWrapWidth);
    }
    let mut wrapper = Wrapper::new(strategy, wrap_width);
    wrapper.walk(root, &initial_state, true)?;
    wrapper.flush_word(&initial_state);
    debug!(
        "wrapped text to width {} (limit {wrap_width})",
        wrapper.actual_width
    );
    Ok(wrapper.actual_width)
}

struct Wrapper<'s, W: WrapStrategy> {
    strategy: &'s mut W,
    wrap_width: usize,
    x: usize,
    actual_width: usize,
    /// No word has been placed on the current line yet.
    at_line_start: bool,
    /// No word has been seen in the current paragraph yet.
    at_paragraph_start: bool,
    paragraph_indent: usize,
    word: WordBuffer<W::State>,
    /// Whitespace between the previous word and the buffered one.
    gap: Option<Gap<W::State>>,
}

/// Whitespace separating two words on the same line.
struct Gap<S> {
    state: S,
    /// `false` when the words were only separated by zero-width spaces.
    visible: bool,
}

impl<'s, W: WrapStrategy> Wrapper<'s, W> {
    fn new(strategy: &'s mut W, wrap_width: usize) -> Self {
        Self {
            strategy,
            wrap_width,
            x: 0,
            actual_width: 0,
            at_line_start: true,
            at_paragraph_start: true,
            paragraph_indent: 0,
            word: WordBuffer::default(),
            gap: None,
        }
    }

    fn walk(&mut self, node: &Node, state: &W::State, breakable: bool) -> Result<(), WrapError> {
        let tag = match node {
            Node::Text(text) => {
                self.walk_text(text.text(), state, breakable);
                return Ok(());
            }
            Node::Tag(tag) => tag,
        };
        match tag.tag() {
            None => self.walk_children(tag, state, breakable),
            Some('+') => self.walk_children(tag, state, false),
            Some('<') => Err(WrapError::InvalidParameterUsage { index: tag.index() }),
            Some(c) => self.walk_styled(tag, c, state, breakable, None),
        }
    }

    fn walk_styled(
        &mut self,
        tag: &Tag,
        c: char,
        state: &W::State,
        breakable: bool,
        parameter: Option<&str>,
    ) -> Result<(), WrapError> {
        let (next, advance) = self.strategy.next_state(state, c, parameter);
        self.x += advance;
        self.actual_width = self.actual_width.max(self.x);
        self.walk_children(tag, &next, breakable)
    }

    fn walk_children(
        &mut self,
        tag: &Tag,
        state: &W::State,
        breakable: bool,
    ) -> Result<(), WrapError> {
        // Text of a preceding `<` tag and that tag's index.
        let mut parameter: Option<(String, usize)> = None;
        for child in tag.children() {
            let child_tag = match child {
                Node::Tag(child_tag) => child_tag,
                Node::Text(text) => {
                    if let Some((_, index)) = parameter {
                        return Err(WrapError::InvalidParameterUsage { index });
                    }
                    self.walk_text(text.text(), state, breakable);
                    continue;
                }
            };
            match child_tag.tag() {
                Some('<') | Some('+') | None if parameter.is_some() => {
                    let index = parameter.map_or(0, |(_, index)| index);
                    return Err(WrapError::InvalidParameterUsage { index });
                }
                Some('<') => parameter = Some((child.to_plain_text(), child_tag.index())),
                Some(c) if c != '+' => {
                    let text = parameter.take().map(|(text, _)| text);
                    self.walk_styled(child_tag, c, state, breakable, text.as_deref())?;
                }
                _ => self.walk(child, state, breakable)?,
            }
        }
        match parameter {
            Some((_, index)) => Err(WrapError::InvalidParameterUsage { index }),
            None => Ok(()),
        }
    }

    fn walk_text(&mut self, text: &str, state: &W::State, breakable: bool) {
        for segment in segments(text, breakable) {
            match segment {
                Segment::Word(word) => {
                    let width = self.strategy.measure(state, word);
                    self.word.push(state.clone(), word, width, !breakable);
                    self.at_paragraph_start = false;
                }
                Segment::Space(space) => {
                    self.flush_word(state);
                    if self.at_paragraph_start {
                        let width = self.strategy.measure(state, space);
                        self.strategy.render(state, space, width);
                        self.x += width;
                        self.paragraph_indent += width;
                        self.actual_width = self.actual_width.max(self.x);
                    } else {
                        let visible = space != "\u{200B}";
                        if let Some(gap) = &mut self.gap {
                            gap.visible |= visible;
                        } else {
                            self.gap = Some(Gap {
                                state: state.clone(),
                                visible,
                            });
                        }
                    }
                }
                Segment::Newline => {
                    self.flush_word(state);
                    trace!("starting a new paragraph");
                    self.x = self.strategy.advance_line(state, true, 0);
                    self.at_line_start = true;
                    self.at_paragraph_start = true;
                    self.paragraph_indent = 0;
                    self.gap = None;
                }
            }
        }
    }

    /// Place the buffered word, wrapping first if it does not fit.
    fn flush_word(&mut self, fallback: &W::State) {
        if self.word.is_empty() {
            return;
        }
        let gap = self.gap.take();
        let visible = gap.as_ref().is_none_or(|gap| gap.visible);
        let space_state = gap
            .map(|gap| gap.state)
            .or_else(|| self.word.first_state().cloned())
            .unwrap_or_else(|| fallback.clone());

        if !self.at_line_start {
            let space = if visible { " " } else { "" };
            let space_width = if visible {
                self.strategy.measure(&space_state, space)
            } else {
                0
            };
            if self.x + space_width + self.word.width() > self.wrap_width {
                trace!("wrapping before a word of width {}", self.word.width());
                self.x = self
                    .strategy
                    .advance_line(&space_state, false, self.paragraph_indent);
                self.at_line_start = true;
            } else if visible {
                self.strategy.render(&space_state, space, space_width);
                self.x += space_width;
            }
        }

        let width = self.word.width();
        let pieces = self.word.take();
        if self.at_line_start && self.x + width > self.wrap_width {
            self.break_word(pieces);
        } else {
            for piece in pieces {
                self.strategy.render(&piece.state, &piece.text, piece.width);
                self.x += piece.width;
            }
        }
        self.at_line_start = false;
        self.actual_width = self.actual_width.max(self.x);
    }

    /// Spread a word wider than a whole line over as many lines as it needs.
    ///
    /// Each line receives the longest prefix that fits, except that a line
    /// never starts or ends at whitespace inside a `+` span. When nothing fits
    /// on an empty line the shortest allowed prefix overflows it.
    fn break_word(&mut self, mut pieces: VecDeque<Piece<W::State>>) {
        loop {
            let width: usize = pieces.iter().map(|piece| piece.width).sum();
            if self.x + width <= self.wrap_width {
                for piece in pieces {
                    self.strategy.render(&piece.state, &piece.text, piece.width);
                    self.x += piece.width;
                }
                self.actual_width = self.actual_width.max(self.x);
                return;
            }

            let chars: Vec<(char, bool)> = pieces
                .iter()
                .flat_map(|piece| piece.text.chars().map(|ch| (ch, piece.unbreakable)))
                .collect();
            let available = self.wrap_width.saturating_sub(self.x);
            let mut split = self.fitting_prefix(&pieces, chars.len(), available);
            while split > 0 && !is_line_boundary(&chars, split) {
                split -= 1;
            }
            if split == 0 {
                split = (1..=chars.len())
                    .find(|&end| is_line_boundary(&chars, end))
                    .unwrap_or(chars.len());
            }

            self.render_prefix(&mut pieces, split);
            self.actual_width = self.actual_width.max(self.x);
            let Some(next) = pieces.front() else {
                return;
            };
            self.x = self
                .strategy
                .advance_line(&next.state, false, self.paragraph_indent);
        }
    }

    /// Render the first `count` characters of `pieces`, splitting the piece
    /// the boundary falls in and leaving its tail at the front.
    fn render_prefix(&mut self, pieces: &mut VecDeque<Piece<W::State>>, mut count: usize) {
        while count > 0 {
            let Some(piece) = pieces.pop_front() else {
                return;
            };
            let len = piece.text.chars().count();
            if len <= count {
                self.strategy.render(&piece.state, &piece.text, piece.width);
                self.x += piece.width;
                count -= len;
                continue;
            }

            let at = byte_offset(&piece.text, count);
            let (head, rest) = piece.text.split_at(at);
            let head_width = self.strategy.measure(&piece.state, head);
            self.strategy.render(&piece.state, head, head_width);
            self.x += head_width;
            let rest_width = self.strategy.measure(&piece.state, rest);
            let rest = rest.to_owned();
            pieces.push_front(Piece {
                text: rest,
                width: rest_width,
                ..piece
            });
            return;
        }
    }

    /// Width of the first `count` characters of `pieces`.
    fn prefix_width(&self, pieces: &VecDeque<Piece<W::State>>, mut count: usize) -> usize {
        let mut width = 0;
        for piece in pieces {
            let len = piece.text.chars().count();
            if len <= count {
                width += piece.width;
                count -= len;
            } else {
                if count > 0 {
                    let head = &piece.text[..byte_offset(&piece.text, count)];
                    width += self.strategy.measure(&piece.state, head);
                }
                break;
            }
        }
        width
    }

    /// Number of leading characters of `pieces` no wider than `available`.
    ///
    /// All `total` characters together are known not to fit.
    fn fitting_prefix(
        &self,
        pieces: &VecDeque<Piece<W::State>>,
        total: usize,
        available: usize,
    ) -> usize {
        // `lo` characters fit, `hi` characters do not.
        let mut lo = 0;
        let mut hi = total;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.prefix_width(pieces, mid) <= available {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

/// Whether a line may end after the first `split` characters of a word.
fn is_line_boundary(chars: &[(char, bool)], split: usize) -> bool {
    if split == 0 || split >= chars.len() {
        return true;
    }
    let protected = |(ch, unbreakable): (char, bool)| unbreakable && is_wrap_point(ch);
    !protected(chars[split - 1]) && !protected(chars[split])
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(idx, _)| idx)
}
