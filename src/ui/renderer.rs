//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: delegate to the component renderers
//!
//! Output goes to stdout as ANSI sequences; Zellij owns the screen, so the
//! renderer neither clears it nor restores the cursor.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI for a `rows` x `cols` pane.
///
/// Called from the plugin's `render` hook on every frame Zellij requests.
/// The view model is rebuilt each time, so no render state survives between
/// frames.
///
/// # Parameters
///
/// * `state` - Current application state
/// * `rows` - Pane height in rows
/// * `cols` - Pane width in columns
///
/// # Example
///
/// ```rust,no_run
/// use chrono::Utc;
/// use reliefboard::app::AppState;
/// use reliefboard::ui::{renderer, Theme};
///
/// let state = AppState::new(Theme::default(), Utc::now());
/// renderer::render(&state, 24, 100);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows = rows, cols = cols).entered();

    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_dashboard(&viewmodel, &state.theme, cols, rows);
}
