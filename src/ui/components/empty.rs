//! Empty state component renderer.
//!
//! Shown in place of the table while loading, after a failed load, or when
//! the filters match nothing.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::presentation::StyleClass;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at `row`.
///
/// A failed load draws its message in the emergency color so it cannot be
/// mistaken for an empty result.
///
/// # Parameters
///
/// * `row` - Row of the message; the subtitle goes on `row + 1`
/// * `empty` - Which empty state to explain
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Layout
///
/// ```text
///            Could not load data
///   Fetch error: dataset file missing. Press r to retry
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message = empty.message();
    let msg_len = message.chars().count();
    let msg_padding = (cols.saturating_sub(msg_len)) / 2;

    let color = match empty {
        EmptyState::LoadFailed(_) => theme.style_fg(StyleClass::Emergency),
        EmptyState::Loading | EmptyState::NoResults => Theme::fg(&theme.colors.empty_state_fg),
    };

    position_cursor(row, 1);
    print!("{color}");
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate(empty.subtitle(), cols);
    let sub_len = subtitle.chars().count();
    let sub_padding = (cols.saturating_sub(sub_len)) / 2;

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
