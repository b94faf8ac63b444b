//! Utility helpers shared across integration tests.

use eggsml::{ConsoleText, parse};

/// Parse `input` and wrap it for the console, returning plain lines.
pub fn wrap_plain(input: &str, width: usize, hanging_indent: usize) -> Vec<String> {
    let root = parse(input).expect("input should parse");
    ConsoleText::wrap(&root, width, hanging_indent)
        .expect("wrapping should succeed")
        .to_plain_lines()
}

/// Assert that no line is wider than `width` columns.
pub fn assert_within_width(lines: &[String], width: usize) {
    for line in lines {
        assert!(
            unicode_width::UnicodeWidthStr::width(line.as_str()) <= width,
            "line {line:?} is wider than {width}"
        );
    }
}
