//! Footer component renderer.
//!
//! Renders the keybinding hints, and the transient notice line above them.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::presentation::StyleClass;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered at `row`, truncated to fit.
///
/// # Parameters
///
/// * `row` - Row to draw on, normally the last row of the pane
/// * `footer` - Hints for the current mode and list
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next available row (`row + 1`)
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);

    let text_len = help_text.chars().count();
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders `notice` left-aligned at `row` in the warning color.
///
/// Takes the place of the border above the footer until the next action
/// clears the notice.
pub fn render_notice(row: usize, notice: &str, theme: &Theme, cols: usize) -> usize {
    let text = truncate(&format!(" {notice}"), cols);

    position_cursor(row, 1);
    print!("{}", theme.style_fg(StyleClass::Warning));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}
