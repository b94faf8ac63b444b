//! Buffer for the word currently being assembled by the wrapping engine.
//!
//! A word can cross tag boundaries, so it is kept as a list of pieces, each
//! with the formatting state it must be rendered in. The engine places the
//! whole word at once and only then renders the pieces.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Piece<S> {
    pub(super) state: S,
    pub(super) text: String,
    pub(super) width: usize,
    /// Set for text inside a `+` span, whose whitespace is not a wrap point.
    pub(super) unbreakable: bool,
}

#[derive(Debug)]
pub(super) struct WordBuffer<S> {
    pieces: Vec<Piece<S>>,
    width: usize,
}

impl<S> Default for WordBuffer<S> {
    fn default() -> Self {
        Self {
            pieces: Vec::new(),
            width: 0,
        }
    }
}

impl<S> WordBuffer<S> {
    pub(super) fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Sum of the measured widths of all pieces.
    pub(super) fn width(&self) -> usize {
        self.width
    }

    pub(super) fn first_state(&self) -> Option<&S> {
        self.pieces.first().map(|piece| &piece.state)
    }

    pub(super) fn push(&mut self, state: S, text: &str, width: usize, unbreakable: bool) {
        self.width += width;
        self.pieces.push(Piece {
            state,
            text: text.to_owned(),
            width,
            unbreakable,
        });
    }

    /// Remove and return all pieces, leaving the buffer empty.
    pub(super) fn take(&mut self) -> VecDeque<Piece<S>> {
        self.width = 0;
        std::mem::take(&mut self.pieces).into()
    }
}
