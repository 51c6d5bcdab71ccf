//! Header component renderer.
//!
//! Renders the title bar with centered text and theme-aware colors.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at `row` and returns the next row.
///
/// The title is centered and the line is padded to the full width so an
/// optional `header_bg` fills the whole bar.
///
/// # Parameters
///
/// * `row` - Row to draw on (1-indexed)
/// * `header` - Title text, already carrying the page, count and clock
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next available row (`row + 1`)
///
/// # Layout
///
/// ```text
/// [left padding] ReliefBoard · Alerts (3) · 15:04 [right padding]
/// ```
///
/// Odd leftover space goes to the right side. Width is counted in chars, so
/// the `·` separators do not skew the centering.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = (cols.saturating_sub(title_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));

    print!("{}", Theme::reset());
    row + 1
}
