//! Integration tests for word wrapping through the public API.

use eggsml::{WrapError, WrapStrategy, parse, word_wrap};
use insta::assert_snapshot;

mod prelude;
use prelude::*;

/// Collects lines of plain text, one column per character.
#[derive(Default)]
struct Lines {
    lines: Vec<String>,
}

impl WrapStrategy for Lines {
    type State = ();

    fn measure(&self, _state: &(), text: &str) -> usize {
        text.chars().count()
    }

    fn render(&mut self, _state: &(), text: &str, _width: usize) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_str(text);
        }
    }

    fn advance_line(&mut self, _state: &(), _new_paragraph: bool, indent: usize) -> usize {
        self.lines.push(" ".repeat(indent));
        indent
    }
}

fn wrap_lines(input: &str, width: usize) -> (Vec<String>, usize) {
    let root = parse(input).expect("input should parse");
    let mut lines = Lines::default();
    let actual = word_wrap(&root, (), width, &mut lines).expect("wrapping should succeed");
    (lines.lines, actual)
}

#[rstest]
#[case(5, &["hello"], 5)]
#[case(4, &["hell", "o"], 4)]
fn word_at_the_boundary(#[case] width: usize, #[case] expected: &[&str], #[case] actual: usize) {
    let (lines, measured) = wrap_lines("hello", width);
    assert_eq!(lines, expected);
    assert_eq!(measured, actual);
}

#[test]
fn non_breaking_span_moves_as_one_unit() {
    let (lines, _) = wrap_lines("a +one two+ b", 8);
    assert_eq!(lines, vec!["a", "one two", "b"]);
}

#[rstest]
fn non_breaking_span_wider_than_line_never_breaks_at_its_space(
    #[values(1, 2, 3, 4, 5, 6)] width: usize,
) {
    let (lines, _) = wrap_lines("+one two+", width);
    assert_eq!(lines.concat(), "one two");
    for line in &lines {
        assert_eq!(line.trim(), line, "line {line:?} breaks at the span's space");
    }
    assert!(
        !lines.iter().any(|line| line.as_str() == "one"),
        "span split between its words: {lines:?}"
    );
}

#[test]
fn paragraph_indent_adds_hanging_indent() {
    let lines = wrap_plain(
        "  Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod.",
        24,
        2,
    );
    assert!(lines.len() > 2);
    assert!(lines[0].starts_with("  L"));
    for line in &lines[1..] {
        assert!(line.starts_with("    "), "continuation {line:?} is under-indented");
    }
    assert_within_width(&lines, 24);
}

#[test]
fn wrapped_paragraphs_snapshot() {
    let lines = wrap_plain(
        "EggsML *wraps* text to a fixed width.\n  Indented paragraphs keep their indent, \
         and +non breaking+ spans stay together.",
        28,
        2,
    );
    assert_snapshot!(lines.join("\n"), @r"
    EggsML wraps text to a fixed
      width.
      Indented paragraphs keep
        their indent, and
        non breaking spans stay
        together.
    ");
}

#[test]
fn long_words_always_make_progress() {
    let word = "x".repeat(100);
    let lines = wrap_plain(&word, 7, 0);
    assert_eq!(lines.len(), 15);
    assert_within_width(&lines, 7);
    assert_eq!(lines.concat(), word);
}

#[test]
fn zero_width_is_rejected() {
    let root = parse("text").expect("input should parse");
    let mut lines = Lines::default();
    assert_eq!(
        word_wrap(&root, (), 0, &mut lines),
        Err(WrapError::InvalidWrapWidth)
    );
}

#[test]
fn misplaced_parameter_is_rejected() {
    let root = parse("<param> text").expect("input should parse");
    let mut lines = Lines::default();
    assert_eq!(
        word_wrap(&root, (), 10, &mut lines),
        Err(WrapError::InvalidParameterUsage { index: 0 })
    );
}
