//! Parsing and word wrapping for the EggsML inline markup language.
//!
//! [`markup::parse`] turns EggsML text into an immutable [`markup::Node`]
//! tree. [`wrap::word_wrap`] lays such a tree out in lines of bounded width,
//! delegating measuring, rendering and formatting to a
//! [`wrap::WrapStrategy`]. [`console`] provides a strategy for coloured
//! console output.

pub mod console;
pub mod markup;
pub mod process;
pub mod wrap;

pub use console::{ConsoleColor, ConsoleState, ConsoleText};
pub use markup::{MarkupError, MarkupErrorKind, Node, parse};
pub use process::{OutputMode, ProcessError, WrapOptions, process_document};
pub use wrap::{WrapError, WrapStrategy, word_wrap};
