//! Search bar component renderer.

use crate::ui::helpers::{pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Spaces left and right of the search box.
const SEARCH_BOX_MARGIN: usize = 5;

const PROMPT: &str = " Search: ";

/// Renders the search box at `row` and returns the row after it.
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// A trailing `_` marks the cursor while typing. Once focus moves to the
/// results the border is dimmed. A term longer than the box shows its tail,
/// so the characters being typed stay visible.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2 + 2);
    let border_color = if search.is_typing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };
    let border = Theme::fg(border_color);
    let rule = "─".repeat(inner_width);

    let draw = |offset: usize, left: &str, body: &str, right: &str| {
        position_cursor(row + offset, 1);
        print!("{}{border}{left}{body}{border}{right}{}", " ".repeat(SEARCH_BOX_MARGIN), Theme::reset());
    };

    let cursor = if search.is_typing { "_" } else { "" };
    let room = inner_width.saturating_sub(PROMPT.chars().count());
    let term = tail(&format!("{}{cursor}", search.query), room);
    let body = format!(
        "{}{}",
        Theme::fg(&theme.colors.text_normal),
        pad(&truncate(&format!("{PROMPT}{term}"), inner_width), inner_width)
    );

    draw(0, "┌", &rule, "┐");
    draw(1, "│", &body, "│");
    draw(2, "└", &rule, "┘");

    row + 3
}

/// The last `max_chars` characters of `text`, led by an ellipsis when cut.
fn tail(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let kept: String = text.chars().skip(len - max_chars + 1).collect();
    format!("…{kept}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_keeps_the_end() {
        assert_eq!(tail("shelter", 10), "shelter");
        assert_eq!(tail("temporary shelter_", 8), "…helter_");
        assert_eq!(tail("abc", 0), "");
    }
}
