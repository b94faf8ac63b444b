//! Error type reported by the EggsML parser.

use thiserror::Error;

/// Category of a [`MarkupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupErrorKind {
    /// A run of identical special characters with an odd length above three.
    MalformedRun,
    /// Three closing-only brackets or three backticks in a row.
    InvalidTripling,
    /// A double-quoted literal without its closing quote.
    UnterminatedQuote,
    /// A tag character that neither opens a new tag nor closes the current one.
    UnexpectedCharacter,
    /// End of input reached while tags were still open.
    UnterminatedTag,
}

/// A parse failure with positional context.
///
/// All indexes count `char`s from the start of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at index {index})")]
pub struct MarkupError {
    pub kind: MarkupErrorKind,
    pub message: String,
    /// Position of the offending input.
    pub index: usize,
    /// Number of characters affected, starting at `index`.
    pub length: usize,
    /// An earlier position relevant to the error, such as the start of the
    /// tag that was never closed.
    pub first_index: Option<usize>,
}

impl MarkupError {
    pub(crate) fn new(
        kind: MarkupErrorKind,
        message: impl Into<String>,
        index: usize,
        length: usize,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            index,
            length,
            first_index: None,
        }
    }

    #[must_use]
    pub(crate) fn with_first_index(mut self, first_index: Option<usize>) -> Self {
        self.first_index = first_index;
        self
    }
}
