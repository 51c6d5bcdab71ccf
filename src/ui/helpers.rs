//! Shared rendering utilities.
//!
//! Low-level text helpers used across UI components: cursor positioning,
//! width-aware truncation and search match highlighting.
//!
//! Highlight ranges are byte ranges into the rendered string, as produced by
//! [`match_ranges`](crate::query::match_ranges). Ranges that run past the
//! end of a truncated string are clipped rather than dropped.

use crate::ui::theme::Theme;
use std::ops::Range;

/// Positions the cursor at a 1-indexed row and column.
///
/// # Parameters
///
/// * `row` - Target row, starting at 1
/// * `col` - Target column, starting at 1
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `max_chars` characters, marking the cut with
/// an ellipsis.
///
/// # Example
///
/// ```rust
/// use reliefboard::ui::helpers::truncate;
///
/// assert_eq!(truncate("Flash Flood Warning", 8), "Flash F…");
/// assert_eq!(truncate("Flood", 8), "Flood");
/// ```
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Right-pads `text` with spaces to `width` characters.
///
/// Text already at or past `width` is returned unchanged; combine with
/// [`truncate`] for a fixed-width cell.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - len))
}

/// Splits `text` into `(segment, highlighted)` pieces according to `ranges`.
///
/// Ranges are clipped to the text and snapped to character boundaries;
/// overlapping or out-of-order ranges are skipped.
///
/// # Parameters
///
/// * `text` - The string as it will be printed, possibly truncated
/// * `ranges` - Byte ranges of search matches, left to right
///
/// # Returns
///
/// Consecutive slices of `text` covering all of it, each flagged `true` when
/// it lies inside a match
///
/// # Example
///
/// ```rust
/// use reliefboard::ui::helpers::split_highlights;
///
/// assert_eq!(
///     split_highlights("Flash Flood", &[6..11]),
///     vec![("Flash ", false), ("Flood", true)]
/// );
/// ```
#[must_use]
pub fn split_highlights<'a>(text: &'a str, ranges: &[Range<usize>]) -> Vec<(&'a str, bool)> {
    let mut pieces = Vec::new();
    let mut pos = 0;

    for range in ranges {
        let start = floor_boundary(text, range.start.min(text.len()));
        let end = floor_boundary(text, range.end.min(text.len()));
        if start < pos || start >= end {
            continue;
        }
        if start > pos {
            pieces.push((&text[pos..start], false));
        }
        pieces.push((&text[start..end], true));
        pos = end;
    }

    if pos < text.len() {
        pieces.push((&text[pos..], false));
    }
    pieces
}

/// Largest char boundary of `text` at or before `index`.
fn floor_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Prints `text` with search matches highlighted.
///
/// When `is_selected` is set the selection colors win and no match
/// highlighting is drawn. `restore` is re-emitted after each highlighted
/// segment so the surrounding style continues.
///
/// # Parameters
///
/// * `text` - The string to print
/// * `ranges` - Byte ranges to highlight, see [`split_highlights`]
/// * `theme` - Supplies the match highlight colors
/// * `is_selected` - Whether the row is selected
/// * `restore` - ANSI prefix of the surrounding cell style
pub fn render_highlighted_text(
    text: &str,
    ranges: &[Range<usize>],
    theme: &Theme,
    is_selected: bool,
    restore: &str,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in split_highlights(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{segment}");
            print!("{}{restore}", Theme::reset());
        } else {
            print!("{segment}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Café Relief", 5), "Café…");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_split_highlights() {
        assert_eq!(
            split_highlights("Temporary Shelter", &[10..17]),
            vec![("Temporary ", false), ("Shelter", true)]
        );
        assert_eq!(
            split_highlights("flood flood", &[0..5, 6..11]),
            vec![("flood", true), (" ", false), ("flood", true)]
        );
    }

    #[test]
    fn test_split_highlights_clips_to_text() {
        let text = truncate("Heavy rainfall expected", 10);
        assert_eq!(text, "Heavy rai…");
        assert_eq!(
            split_highlights(&text, &[6..14]),
            vec![("Heavy ", false), ("rai…", true)]
        );
        assert_eq!(split_highlights("abc", &[5..9]), vec![("abc", false)]);
    }
}
