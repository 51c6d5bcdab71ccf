//! Composable UI component renderers.
//!
//! Each component renders one part of the dashboard at a given row and
//! returns the next free row, so the layout reads top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar with page, count and clock
//! - [`tabs`]: Page tabs and alerts sub-tabs
//! - [`filter_bar`]: Categorical filter and map layer chips
//! - [`search`]: Search input box
//! - [`table`]: Record table and selection detail
//! - [`empty`]: Loading, failure and no-results messages
//! - [`footer`]: Keybinding hints and notices
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Page tabs]
//! [Border]
//! [Sub-tabs]        (alerts page)
//! [Filter chips]    (lists with filters, map layers)
//! [Search Bar]      (search mode, 3 lines)
//! [Column titles]
//! [Rows or empty state]
//! [Selection detail, 2 lines]
//! [Border or notice]
//! [Footer]
//! ```

mod empty;
mod filter_bar;
mod footer;
mod header;
mod search;
mod table;
mod tabs;

use crate::app::state::DETAIL_LINES;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use filter_bar::render_filter_bar;
use footer::{render_footer, render_notice};
use header::render_header;
use search::render_search_bar;
use table::{render_selection_detail, render_table_headers, render_table_rows};
use tabs::render_tabs;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full dashboard layout for `vm`.
///
/// Components are drawn top to bottom; the selection detail, border and
/// footer are anchored to the bottom of the pane.
///
/// # Parameters
///
/// * `vm` - View model computed for this frame
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
/// * `rows` - Pane height in rows
pub fn render_dashboard(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_tabs(current_row, &vm.tabs, 1, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if !vm.sub_tabs.is_empty() {
        current_row = render_tabs(current_row, &vm.sub_tabs, 3, theme, cols);
    }
    if let Some(bar) = &vm.filter_bar {
        current_row = render_filter_bar(current_row, bar, theme, cols);
    }
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    current_row = render_table_headers(current_row, &vm.columns, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let detail_row = border_row.saturating_sub(DETAIL_LINES);

    render_selection_detail(detail_row, &vm.selection_detail, DETAIL_LINES, theme, cols);

    if let Some(notice) = &vm.footer.notice {
        render_notice(border_row, notice, theme, cols);
    } else {
        render_border(border_row, &theme.colors.border, cols);
    }
    render_footer(footer_start, &vm.footer, theme, cols);
}
