//! Display width calculation for terminal rendering.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Columns between tab stops.
pub const TAB_WIDTH: usize = 8;

/// Shown in place of control characters.
pub const CONTROL_PLACEHOLDER: char = '?';

/// Width of `grapheme` when it starts at display column `col`.
///
/// Tabs advance to the next tab stop and control characters occupy the one
/// column of their placeholder. Everything else uses its East Asian width.
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str, col: usize) -> usize {
    if grapheme == "\t" {
        TAB_WIDTH - col % TAB_WIDTH
    } else if grapheme.starts_with(char::is_control) {
        1
    } else {
        UnicodeWidthStr::width(grapheme)
    }
}

/// Display width of a single line, with tabs expanded.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.graphemes(true)
        .fold(0, |col, g| col + grapheme_width(g, col))
}

/// Make a line safe to write to the terminal: tabs become spaces up to the
/// next tab stop and other control characters become [`CONTROL_PLACEHOLDER`].
///
/// The result has the same display width as [`display_width`] reports.
#[must_use]
pub fn render_line(text: &str) -> Cow<'_, str> {
    if !text.contains(char::is_control) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + TAB_WIDTH);
    let mut col = 0;
    for g in text.graphemes(true) {
        let width = grapheme_width(g, col);
        if g == "\t" {
            out.extend(std::iter::repeat_n(' ', width));
        } else if g.starts_with(char::is_control) {
            out.push(CONTROL_PLACEHOLDER);
        } else {
            out.push_str(g);
        }
        col += width;
    }
    Cow::Owned(out)
}

/// Longest prefix of `text` whose display width fits in `max` columns.
///
/// A wide grapheme that would straddle the limit is left out entirely.
#[must_use]
pub fn clip_to_width(text: &str, max: usize) -> &str {
    let mut col = 0;
    for (idx, g) in text.grapheme_indices(true) {
        col += grapheme_width(g, col);
        if col > max {
            return &text[..idx];
        }
    }
    text
}

/// `text` with its first `cols` display columns removed.
///
/// A wide grapheme cut by the left edge leaves spaces for its visible part.
/// Expects a line already passed through [`render_line`].
#[must_use]
pub fn skip_columns(text: &str, cols: usize) -> Cow<'_, str> {
    fn pad(n: usize, rest: &str) -> Cow<'_, str> {
        if n == 0 {
            Cow::Borrowed(rest)
        } else {
            Cow::Owned(format!("{:n$}{rest}", ""))
        }
    }

    let mut col = 0;
    for (idx, g) in text.grapheme_indices(true) {
        if col >= cols {
            return pad(col - cols, &text[idx..]);
        }
        col += grapheme_width(g, col);
    }
    pad(col.saturating_sub(cols), "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_wide_and_combining() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("e\u{301}"), 1);
    }

    #[test]
    fn test_tab_stops() {
        assert_eq!(display_width("\t"), TAB_WIDTH);
        assert_eq!(display_width("ab\t"), TAB_WIDTH);
        assert_eq!(display_width("ab\tc"), TAB_WIDTH + 1);
        assert_eq!(render_line("a\tb"), format!("a{}b", " ".repeat(TAB_WIDTH - 1)));
        assert!(matches!(render_line("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_control_characters_are_replaced() {
        assert_eq!(render_line("a\x1b[2Jb"), "a?[2Jb");
        assert_eq!(render_line("line\r"), "line?");
        assert_eq!(display_width("a\x1bb"), render_line("a\x1bb").len());
    }

    #[test]
    fn test_clip_to_width() {
        assert_eq!(clip_to_width("hello", 3), "hel");
        assert_eq!(clip_to_width("hello", 10), "hello");
        assert_eq!(clip_to_width("日本語", 5), "日本");
        assert_eq!(clip_to_width("日本語", 1), "");
        assert_eq!(clip_to_width("abc", 0), "");
    }

    #[test]
    fn test_skip_columns() {
        assert_eq!(skip_columns("hello", 0), "hello");
        assert_eq!(skip_columns("hello", 2), "llo");
        assert_eq!(skip_columns("hello", 9), "");
        assert_eq!(skip_columns("日本語", 2), "本語");
        assert_eq!(skip_columns("日本語", 3), " 語");
        assert_eq!(skip_columns("日本", 3), " ");
    }
}
