//! Splitting text into words, wrap points and paragraph breaks.

/// Whether a line may be broken at `c`.
///
/// Whitespace breaks lines except the no-break spaces U+00A0 and U+202F. The
/// zero-width space U+200B is not whitespace but still breaks lines.
#[must_use]
pub fn is_wrap_point(c: char) -> bool {
    match c {
        '\u{00A0}' | '\u{202F}' => false,
        '\u{200B}' => true,
        c => c.is_whitespace(),
    }
}

/// A piece of a text node as seen by the wrapping engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Segment<'a> {
    /// A maximal run of characters that are not wrap points.
    Word(&'a str),
    /// A single wrap-point character.
    Space(&'a str),
    /// A literal line feed, which starts a new paragraph.
    Newline,
}

/// Split `text` into [`Segment`]s.
///
/// When `breakable` is `false` only line feeds interrupt a word.
pub(super) fn segments(text: &str, breakable: bool) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut word_start: Option<usize> = None;
    for (idx, ch) in text.char_indices() {
        let splits = ch == '\n' || (breakable && is_wrap_point(ch));
        if !splits {
            word_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = word_start.take() {
            out.push(Segment::Word(&text[start..idx]));
        }
        if ch == '\n' {
            out.push(Segment::Newline);
        } else {
            out.push(Segment::Space(&text[idx..idx + ch.len_utf8()]));
        }
    }
    if let Some(start) = word_start {
        out.push(Segment::Word(&text[start..]));
    }
    out
}
