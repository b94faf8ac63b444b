//! Character-level scanning helpers used by the parser.
//!
//! The parser works on a `char` buffer so that every index it reports is a
//! character offset. These helpers classify special characters, measure runs
//! of identical characters and decode quoted literals.

/// Every character with a meaning in EggsML markup.
pub const SPECIAL_CHARS: &[char] = &[
    '~', '@', '#', '$', '%', '^', '&', '*', '_', '=', '+', '/', '\\', '|', '[', ']', '{', '}',
    '<', '>', '"', '`',
];

/// Whether `c` has a meaning in EggsML markup.
#[inline]
#[must_use]
pub fn is_special(c: char) -> bool {
    SPECIAL_CHARS.contains(&c)
}

/// The character that closes a tag opened with `c`.
#[must_use]
pub fn opposite(c: char) -> char {
    match c {
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

/// Closing brackets, which can never open a tag.
#[inline]
pub(super) fn is_always_closing(c: char) -> bool {
    matches!(c, ']' | '}' | '>')
}

/// Whether a tag may carry `c` as its tag character.
#[must_use]
pub fn is_tag_char(c: char) -> bool {
    is_special(c) && !is_always_closing(c) && c != '`' && c != '"'
}

/// Advance `idx` while the predicate evaluates to `true`.
///
/// Returns the index of the first character for which `cond` fails.
pub(super) fn scan_while<F>(chars: &[char], start: usize, mut cond: F) -> usize
where
    F: FnMut(char) -> bool,
{
    let mut idx = start;
    while idx < chars.len() && cond(chars[idx]) {
        idx += 1;
    }
    idx
}

/// Length of the run of characters identical to `chars[start]`.
pub(super) fn run_length(chars: &[char], start: usize) -> usize {
    let first = chars[start];
    scan_while(chars, start, |c| c == first) - start
}

/// Decode a quoted literal whose opening quote sits at `start`.
///
/// Returns the decoded content and the index just past the closing quote, or
/// `None` when the input ends before the literal is closed.
pub(super) fn scan_quoted(chars: &[char], start: usize) -> Option<(String, usize)> {
    debug_assert_eq!(chars.get(start), Some(&'"'), "quoted literal must start at a quote");
    let mut content = String::new();
    let mut idx = start + 1;
    while idx < chars.len() {
        if chars[idx] == '"' {
            if chars.get(idx + 1) == Some(&'"') {
                content.push('"');
                idx += 2;
                continue;
            }
            return Some((content, idx + 1));
        }
        content.push(chars[idx]);
        idx += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[rstest]
    #[case::single("*a", 0, 1)]
    #[case::triple("***a", 0, 3)]
    #[case::to_end("~~~~", 0, 4)]
    #[case::offset("ab__c", 2, 2)]
    fn measures_runs(#[case] text: &str, #[case] start: usize, #[case] expected: usize) {
        assert_eq!(run_length(&chars(text), start), expected);
    }

    #[rstest]
    #[case::plain(r#""abc" tail"#, Some(("abc", 5)))]
    #[case::doubled(r#""a""b""#, Some((r#"a"b"#, 6)))]
    #[case::specials_are_literal(r#""*[`"x"#, Some(("*[`", 5)))]
    #[case::leading_doubled(r#""""x""#, Some((r#""x"#, 5)))]
    #[case::unterminated(r#""abc"#, None)]
    #[case::doubled_at_end(r#""ab"""#, None)]
    fn decodes_quoted_literals(#[case] text: &str, #[case] expected: Option<(&str, usize)>) {
        let decoded = scan_quoted(&chars(text), 0);
        assert_eq!(
            decoded.as_ref().map(|(s, end)| (s.as_str(), *end)),
            expected
        );
    }

    #[test]
    fn brackets_pair_with_their_closers() {
        assert_eq!(opposite('['), ']');
        assert_eq!(opposite('{'), '}');
        assert_eq!(opposite('<'), '>');
        assert_eq!(opposite('*'), '*');
    }

    #[test]
    fn tag_chars_exclude_closers_and_quoting() {
        assert!(is_tag_char('*'));
        assert!(is_tag_char('['));
        assert!(!is_tag_char(']'));
        assert!(!is_tag_char('`'));
        assert!(!is_tag_char('"'));
        assert!(!is_tag_char('a'));
    }
}
