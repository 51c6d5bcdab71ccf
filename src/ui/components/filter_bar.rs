//! Filter chip row renderer.
//!
//! Each chip shows the key that cycles it, e.g. `[l] Level: Critical`.
//! Chips whose filter constrains the list are drawn in the info color.

use crate::ui::helpers::position_cursor;
use crate::ui::presentation::StyleClass;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the chip row at `row` and returns the next row.
///
/// # Parameters
///
/// * `row` - Row to draw on (1-indexed)
/// * `bar` - Chips in key order (`l`, `t`, `v`, or `1`-`4` on the map)
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next available row (`row + 1`)
pub fn render_filter_bar(row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(" ");

    let mut used = 1;
    for chip in &bar.chips {
        let text = format!("[{}] {}", chip.key, chip.label);
        let width = text.chars().count() + 2;
        if used + width > cols {
            break;
        }

        if chip.is_active {
            print!("{}", Theme::bold());
            print!("{}", theme.style_fg(StyleClass::Info));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{text}");
        print!("{}  ", Theme::reset());
        used += width;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
