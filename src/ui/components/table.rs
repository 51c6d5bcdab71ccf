//! Table component renderer.
//!
//! Rows are laid out in four columns: icon and title, badge, meta and a
//! detail column that takes the remaining width. Selection colors cover the
//! whole row; search matches are highlighted in the title and detail.

use crate::app::state::{BADGE_COLUMN_WIDTH, META_COLUMN_WIDTH, TITLE_COLUMN_WIDTH};
use crate::ui::helpers::{self, pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeaders, DisplayItem};

/// Width left for the detail column once the fixed columns are placed.
fn detail_width(cols: usize) -> usize {
    cols.saturating_sub(TITLE_COLUMN_WIDTH + BADGE_COLUMN_WIDTH + META_COLUMN_WIDTH)
}

/// Renders the bold column titles at `row` and returns the next row.
///
/// # Parameters
///
/// * `row` - Row to draw on (1-indexed)
/// * `columns` - Titles for the current list, e.g. `ALERT LEVEL REPORTED`
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next available row (`row + 1`)
pub fn render_table_headers(row: usize, columns: &ColumnHeaders, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));

    let line = format!(
        "  {}{}{}{}",
        pad(columns.title, TITLE_COLUMN_WIDTH - 2),
        pad(columns.badge, BADGE_COLUMN_WIDTH),
        pad(columns.meta, META_COLUMN_WIDTH),
        truncate(columns.detail, detail_width(cols)),
    );
    let line = truncate(&line, cols);
    print!("{}", pad(&line, cols));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders `items` one per row starting at `row` and returns the row after
/// the last one.
///
/// # Parameters
///
/// * `row` - Row of the first item
/// * `items` - The visible window of rows, already windowed by the state
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Layout
///
/// ```text
/// ⚠ Flash Flood Warning          Critical    2 hours ago         Heavy rainfall...
/// └──────── title ─────────────┘ └ badge ──┘ └ meta ───────────┘ └ detail ─────┘
/// ```
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base}");

    // icon
    if !item.is_selected {
        print!("{}", theme.style_fg(item.style));
    }
    print!("{} ", item.icon.glyph());
    print!("{base}");

    helpers::render_highlighted_text(&item.title, &item.title_ranges, theme, item.is_selected, &base);
    print!(
        "{}",
        " ".repeat((TITLE_COLUMN_WIDTH - 2).saturating_sub(item.title.chars().count()))
    );

    let badge = match &item.badge {
        Some(badge) => {
            if !item.is_selected {
                print!("{}", theme.style_fg(badge.style));
            }
            truncate(&badge.label, BADGE_COLUMN_WIDTH - 1)
        }
        None => String::new(),
    };
    print!("{}", pad(&badge, BADGE_COLUMN_WIDTH));
    print!("{base}");

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", pad(&truncate(&item.meta, META_COLUMN_WIDTH - 1), META_COLUMN_WIDTH));
    print!("{base}");

    let width = detail_width(cols);
    let detail = truncate(&item.detail, width);
    helpers::render_highlighted_text(&detail, &item.detail_ranges, theme, item.is_selected, &base);

    let line_len = TITLE_COLUMN_WIDTH + BADGE_COLUMN_WIDTH + META_COLUMN_WIDTH + detail.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the selected record's extra lines starting at `row`.
///
/// # Parameters
///
/// * `row` - Row of the first line
/// * `lines` - Detail lines for the selection, e.g. address and contact
/// * `max_lines` - Rows reserved for the detail; extra lines are dropped
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
pub fn render_selection_detail(row: usize, lines: &[String], max_lines: usize, theme: &Theme, cols: usize) {
    for (offset, line) in lines.iter().take(max_lines).enumerate() {
        let text = truncate(&format!("  {line}"), cols);
        position_cursor(row + offset, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", pad(&text, cols));
        print!("{}", Theme::reset());
    }
}
