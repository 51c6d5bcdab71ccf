//! Tab bar renderer for pages and the alerts sub-tabs.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TabInfo;

/// Renders a row of tabs starting at column `indent + 1` and returns the
/// next row.
///
/// The active tab uses the theme's tab colors; the others are dimmed.
///
/// # Parameters
///
/// * `row` - Row to draw on (1-indexed)
/// * `tabs` - Labels in display order, one marked active
/// * `indent` - Leading blank columns; sub-tabs sit deeper than page tabs
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
/// [indent][ Overview ] [ Alerts ] [ Resources ] ...
/// ```
///
/// Tabs that would overflow `cols` are dropped rather than wrapped.
pub fn render_tabs(row: usize, tabs: &[TabInfo], indent: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(indent));

    let mut used = indent;
    for tab in tabs {
        let label = format!(" {} ", tab.label);
        let width = label.chars().count() + 1;
        if used + width > cols {
            break;
        }

        if tab.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.tab_active_fg));
            print!("{}", Theme::bg(&theme.colors.tab_active_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}");
        print!("{} ", Theme::reset());
        used += width;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
