//! Grapheme cluster indexing within a line.

use unicode_segmentation::UnicodeSegmentation;

use super::width::grapheme_width;

/// Number of grapheme clusters in `line`.
#[must_use]
pub fn grapheme_count(line: &str) -> usize {
    line.graphemes(true).count()
}

/// Byte offset of the `index`-th grapheme in `line`, or `line.len()` when
/// `index` is past the end.
#[must_use]
pub fn grapheme_offset(line: &str, index: usize) -> usize {
    line.grapheme_indices(true)
        .nth(index)
        .map_or(line.len(), |(offset, _)| offset)
}

/// Display column at which the `index`-th grapheme of `line` starts.
#[must_use]
pub fn column_of(line: &str, index: usize) -> usize {
    line.graphemes(true)
        .take(index)
        .fold(0, |col, g| col + grapheme_width(g, col))
}
