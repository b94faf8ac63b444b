//! Console colouring for word-wrapped EggsML.
//!
//! Tag characters select one of sixteen console colours:
//!
//! | tag | colour       | inside `*`  |
//! |-----|--------------|-------------|
//! | `~` | black        | dark gray   |
//! | `/` | dark blue    | blue        |
//! | `$` | dark green   | green       |
//! | `&` | dark cyan    | cyan        |
//! | `_` | dark red     | red         |
//! | `%` | dark magenta | magenta     |
//! | `^` | dark yellow  | yellow      |
//! | `=` | gray         | white       |
//!
//! `*` brightens whichever colour is active, in either nesting order. Other
//! tags leave the colour unchanged. Unformatted text is gray.

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::{
    markup::Node,
    wrap::{WrapError, WrapStrategy, word_wrap},
};

/// The sixteen console colours, dark variants first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    DarkGray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl ConsoleColor {
    /// The bright counterpart of a dark colour; bright colours map to themselves.
    #[must_use]
    pub fn brighten(self) -> Self {
        match self {
            Self::Black => Self::DarkGray,
            Self::DarkBlue => Self::Blue,
            Self::DarkGreen => Self::Green,
            Self::DarkCyan => Self::Cyan,
            Self::DarkRed => Self::Red,
            Self::DarkMagenta => Self::Magenta,
            Self::DarkYellow => Self::Yellow,
            Self::Gray => Self::White,
            bright => bright,
        }
    }

    /// Colour selected by a tag character, if any.
    #[must_use]
    pub fn from_tag(tag: char) -> Option<Self> {
        Some(match tag {
            '~' => Self::Black,
            '/' => Self::DarkBlue,
            '$' => Self::DarkGreen,
            '&' => Self::DarkCyan,
            '_' => Self::DarkRed,
            '%' => Self::DarkMagenta,
            '^' => Self::DarkYellow,
            '=' => Self::Gray,
            _ => return None,
        })
    }

    fn ansi(self) -> Color {
        match self {
            Self::Black => Color::Black,
            Self::DarkBlue => Color::Blue,
            Self::DarkGreen => Color::Green,
            Self::DarkCyan => Color::Cyan,
            Self::DarkRed => Color::Red,
            Self::DarkMagenta => Color::Magenta,
            Self::DarkYellow => Color::Yellow,
            Self::Gray => Color::White,
            Self::DarkGray => Color::BrightBlack,
            Self::Blue => Color::BrightBlue,
            Self::Green => Color::BrightGreen,
            Self::Cyan => Color::BrightCyan,
            Self::Red => Color::BrightRed,
            Self::Magenta => Color::BrightMagenta,
            Self::Yellow => Color::BrightYellow,
            Self::White => Color::BrightWhite,
        }
    }
}

/// Formatting state threaded through the tree while wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleState {
    base: ConsoleColor,
    bright: bool,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            base: ConsoleColor::Gray,
            bright: false,
        }
    }
}

impl ConsoleState {
    /// The colour text is displayed in.
    #[must_use]
    pub fn color(self) -> ConsoleColor {
        if self.bright {
            self.base.brighten()
        } else {
            self.base
        }
    }

    /// State inside a tag with character `tag`.
    #[must_use]
    pub fn enter(self, tag: char) -> Self {
        if tag == '*' {
            return Self {
                bright: true,
                ..self
            };
        }
        ConsoleColor::from_tag(tag).map_or(self, |base| Self { base, ..self })
    }
}

/// A run of text in a single colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub color: ConsoleColor,
    pub text: String,
}

/// Word-wrapped, coloured console output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConsoleText {
    lines: Vec<Vec<Span>>,
    width: usize,
}

impl ConsoleText {
    /// Wrap `root` to `width` columns.
    ///
    /// Continuation lines of a paragraph are indented by the paragraph's
    /// leading whitespace plus `hanging_indent` columns.
    ///
    /// # Errors
    /// Returns a [`WrapError`] when `width` is zero or a parameter tag is
    /// misplaced.
    pub fn wrap(root: &Node, width: usize, hanging_indent: usize) -> Result<Self, WrapError> {
        let mut writer = ConsoleWriter {
            lines: vec![Vec::new()],
            hanging_indent,
        };
        let width = word_wrap(root, ConsoleState::default(), width, &mut writer)?;
        Ok(Self {
            lines: writer.lines,
            width,
        })
    }

    #[must_use]
    pub fn lines(&self) -> &[Vec<Span>] {
        &self.lines
    }

    /// Widest line, in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Lines without colour information.
    #[must_use]
    pub fn to_plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }

    /// Lines with ANSI colour escapes, subject to `colored`'s global override.
    ///
    /// Gray text is left uncoloured.
    #[must_use]
    pub fn to_ansi_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                line.iter()
                    .map(|span| match span.color {
                        ConsoleColor::Gray => span.text.clone(),
                        color => span.text.as_str().color(color.ansi()).to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

struct ConsoleWriter {
    lines: Vec<Vec<Span>>,
    hanging_indent: usize,
}

impl ConsoleWriter {
    fn push(&mut self, color: ConsoleColor, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(line) = self.lines.last_mut() else {
            return;
        };
        if let Some(span) = line.last_mut().filter(|span| span.color == color) {
            span.text.push_str(text);
            return;
        }
        line.push(Span {
            color,
            text: text.to_owned(),
        });
    }
}

impl WrapStrategy for ConsoleWriter {
    type State = ConsoleState;

    fn measure(&self, _state: &ConsoleState, text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }

    fn render(&mut self, state: &ConsoleState, text: &str, _width: usize) {
        self.push(state.color(), text);
    }

    fn advance_line(&mut self, state: &ConsoleState, new_paragraph: bool, indent: usize) -> usize {
        self.lines.push(Vec::new());
        if new_paragraph {
            return 0;
        }
        let x = indent + self.hanging_indent;
        self.push(state.color(), &" ".repeat(x));
        x
    }

    fn next_state(
        &mut self,
        state: &ConsoleState,
        tag: char,
        _parameter: Option<&str>,
    ) -> (ConsoleState, usize) {
        (state.enter(tag), 0)
    }
}
