//! Parsing and reconstruction of EggsML inline markup.
//!
//! EggsML marks up text with single special characters: `*bold*`,
//! `[bracketed]`, `<parameter>`. Doubling a special character makes it
//! literal, tripling it opens a tag nested inside one of the same kind, a
//! lone backtick separates otherwise adjacent delimiters and double quotes
//! enclose raw literal text.

mod error;
mod escape;
mod node;
mod parser;
mod scanning;

pub use error::{MarkupError, MarkupErrorKind};
pub use escape::escape;
pub use node::{Node, Tag, Text};
pub use parser::parse;
pub use scanning::{SPECIAL_CHARS, is_special, is_tag_char, opposite};
