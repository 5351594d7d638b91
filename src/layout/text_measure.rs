//! Text Measurement
//!
//! Utilities for measuring and wrapping text in terminal cells.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Control and zero-width characters: 0 cells
//!
//! Wrapping is per glyph, not per word: a line breaks at the first glyph
//! that would not fit. `\n` forces a break and `\r` is dropped. The layout
//! engine paints with exactly this flow, so a height measured here always
//! matches what gets drawn.

use unicode_width::UnicodeWidthChar;

use crate::view::Span;

/// Display width of a glyph in cells (0, 1 or 2).
#[inline]
pub fn char_width(c: char) -> i32 {
    c.width().unwrap_or(0) as i32
}

/// Display width of a string in cells.
pub fn string_width(s: &str) -> i32 {
    s.chars().map(char_width).sum()
}

/// One glyph placed by the text flow, in line-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub ch: char,
    pub width: i32,
    pub x: i32,
    pub line: i32,
}

/// Flow styled runs into lines of at most `width` cells.
///
/// Calls `place` for every visible glyph together with the index of the
/// run it came from, and returns the number of lines produced. Returning
/// `false` from `place` stops the flow early.
pub fn flow<F>(spans: &[Span], width: i32, mut place: F) -> i32
where
    F: FnMut(usize, Placed) -> bool,
{
    let (mut x, mut line) = (0, 0);
    for (run, span) in spans.iter().enumerate() {
        for ch in span.text.chars() {
            match ch {
                '\r' => continue,
                '\n' => {
                    line += 1;
                    x = 0;
                    continue;
                }
                _ => {}
            }
            let w = char_width(ch);
            if w == 0 {
                continue;
            }
            if x + w > width {
                line += 1;
                x = 0;
            }
            if !place(run, Placed { ch, width: w, x, line }) {
                return line + 1;
            }
            x += w;
        }
    }
    line + 1
}

/// Number of lines the runs occupy when wrapped to `width` cells.
///
/// Always at least 1, even for empty content.
pub fn wrapped_height(spans: &[Span], width: i32) -> i32 {
    flow(spans, width, |_, _| true)
}

/// Wrap runs to `width` cells, returning the text of each line.
pub fn wrap_lines(spans: &[Span], width: i32) -> Vec<String> {
    let mut lines = vec![String::new()];
    let total = flow(spans, width, |_, placed| {
        while lines.len() <= placed.line as usize {
            lines.push(String::new());
        }
        lines[placed.line as usize].push(placed.ch);
        true
    });
    lines.resize(total as usize, String::new());
    lines
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(parts: &[&str]) -> Vec<Span> {
        parts.iter().map(|s| Span::raw(*s)).collect()
    }

    #[test]
    fn test_char_width() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('日'), 2);
        assert_eq!(char_width('\u{7}'), 0);
        assert_eq!(char_width('│'), 1);
    }

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width("日本"), 4);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_empty_text_is_one_line() {
        assert_eq!(wrapped_height(&[], 10), 1);
        assert_eq!(wrapped_height(&spans(&[""]), 10), 1);
    }

    #[test]
    fn test_wraps_at_width() {
        assert_eq!(wrap_lines(&spans(&["abcdefg"]), 3), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_newline_and_carriage_return() {
        let lines = wrap_lines(&spans(&["ab\r\ncd\n"]), 10);
        assert_eq!(lines, vec!["ab", "cd", ""]);
    }

    #[test]
    fn test_wide_glyph_moves_to_next_line() {
        // "a日" needs 3 cells; with width 2 the wide glyph wraps.
        let lines = wrap_lines(&spans(&["a日b"]), 2);
        assert_eq!(lines, vec!["a", "日", "b"]);
    }

    #[test]
    fn test_wrap_is_deterministic() {
        let content = spans(&["ab日", "c\nde", "日日f"]);
        let first = wrap_lines(&content, 4);
        assert_eq!(first, vec!["ab日", "c", "de日", "日f"]);
        assert_eq!(wrapped_height(&content, 4), first.len() as i32);
        for _ in 0..5 {
            assert_eq!(wrap_lines(&content, 4), first);
            assert_eq!(wrapped_height(&content, 4), 4);
        }
    }

    #[test]
    fn test_flow_reports_run_index() {
        let content = spans(&["a", "b"]);
        let mut runs = Vec::new();
        flow(&content, 10, |run, _| {
            runs.push(run);
            true
        });
        assert_eq!(runs, vec![0, 1]);
    }
}
