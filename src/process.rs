//! High-level document processing: parse, then wrap or project.

use thiserror::Error;

use crate::{
    console::ConsoleText,
    markup::{MarkupError, parse},
    wrap::WrapError,
};

/// What [`process_document`] produces from a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Word-wrapped text.
    #[default]
    Wrapped,
    /// The text with all markup removed, unwrapped.
    PlainText,
    /// Canonical EggsML markup regenerated from the tree.
    Markup,
}

/// How [`process_document`] lays out its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapOptions {
    /// Maximum line width in terminal columns.
    pub width: usize,
    /// Extra indent for continuation lines.
    pub hanging_indent: usize,
    pub mode: OutputMode,
    /// Emit ANSI colour escapes for wrapped output.
    pub color: bool,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            width: 80,
            hanging_indent: 0,
            mode: OutputMode::Wrapped,
            color: false,
        }
    }
}

/// Failure to parse or wrap a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Markup(#[from] MarkupError),
    #[error(transparent)]
    Wrap(#[from] WrapError),
}

/// Turn an EggsML document into output lines.
///
/// A single trailing line feed ends the last line instead of starting an
/// empty paragraph.
///
/// # Errors
/// Returns [`ProcessError::Markup`] for malformed markup and
/// [`ProcessError::Wrap`] for an invalid width or misplaced parameter tag.
pub fn process_document(input: &str, opts: &WrapOptions) -> Result<Vec<String>, ProcessError> {
    let input = input
        .strip_suffix('\n')
        .map_or(input, |rest| rest.strip_suffix('\r').unwrap_or(rest));
    let root = parse(input)?;
    let lines = match opts.mode {
        OutputMode::PlainText => split_lines(&root.to_plain_text()),
        OutputMode::Markup => split_lines(&root.to_markup_text()),
        OutputMode::Wrapped => {
            let text = ConsoleText::wrap(&root, opts.width, opts.hanging_indent)?;
            if opts.color {
                text.to_ansi_lines()
            } else {
                text.to_plain_lines()
            }
        }
    };
    Ok(lines)
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}
