//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, timer
//! ticks and worker responses, translating them into state changes and action
//! sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime or worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `PrevPage`, `NextTab`, `PrevTab`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`, `Char`, `Backspace`
//! - **Filters**: `CycleLevel`, `CycleType`, `CycleVerified`, `ToggleLayer`
//! - **System**: `Reload`, `Tick`, `CloseFocus`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use reliefboard::app::{handle_event, AppState, Event};
//! use reliefboard::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Utc::now());
//! let (should_render, actions) = handle_event(&mut state, &Event::Reload)?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::modes::{InputMode, Page, SearchFocus};
use crate::app::state::LoadState;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::query::{FilterKey, Layer};
use crate::worker::{WorkerMessage, WorkerResponse};
use chrono::{DateTime, Utc};

/// Events triggered by user input, timers or worker responses.
///
/// The handler processes these sequentially, so state transitions are
/// deterministic for a given event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves selection down by one row (wraps to top).
    KeyDown,
    /// Moves selection up by one row (wraps to bottom).
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,

    /// Switches to the next page.
    NextPage,
    /// Switches to the previous page.
    PrevPage,
    /// Switches to the next alerts sub-tab (alerts page only).
    NextTab,
    /// Switches to the previous alerts sub-tab (alerts page only).
    PrevTab,

    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,
    /// Exits search mode and clears the search term.
    ExitSearch,
    /// Appends a character to the search term.
    Char(char),
    /// Removes the last character from the search term.
    Backspace,

    /// Cycles the level or severity filter of the current list.
    CycleLevel,
    /// Cycles the type, category or skill filter of the current list.
    CycleType,
    /// Cycles the verified filter of the current list.
    CycleVerified,
    /// Shows or hides a map layer (map page only).
    ToggleLayer(Layer),

    /// Discards the snapshot and loads the dataset again.
    Reload,

    /// Advances the clock used for relative times.
    Tick(DateTime<Utc>),

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns whether to
/// re-render together with the actions to execute.
///
/// # Parameters
///
/// * `state` - Application state to update in place
/// * `event` - Input, clock or worker event from the plugin shim
///
/// # Returns
///
/// `(should_render, actions)`. Actions are side effects for the shim to run,
/// such as posting a load to the worker or closing the pane.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use reliefboard::app::{handle_event, Action, AppState, Event, LoadState};
/// use reliefboard::ui::Theme;
///
/// let mut state = AppState::new(Theme::default(), Utc::now());
/// let (render, actions) = handle_event(&mut state, &Event::Reload).unwrap();
/// assert!(render);
/// assert!(matches!(state.load_state, LoadState::Loading));
/// assert!(matches!(actions.as_slice(), [Action::PostToWorker(_)]));
/// ```
///
/// # Errors
///
/// Returns errors from state mutation methods.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::NextPage => {
            state.set_page(state.page.next());
            Ok((true, vec![]))
        }
        Event::PrevPage => {
            state.set_page(state.page.prev());
            Ok((true, vec![]))
        }
        Event::NextTab | Event::PrevTab => {
            if state.page != Page::Alerts {
                return Ok((false, vec![]));
            }
            let tab = if *event == Event::NextTab {
                state.alerts_tab.next()
            } else {
                state.alerts_tab.prev()
            };
            tracing::debug!(tab = tab.label(), "alerts tab changed");
            state.set_alerts_tab(tab);
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            if !state.active_list().is_searchable() {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.active_query_mut().search_term.clear();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            if state.active_query_mut().search_term.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            state.selected_index = 0;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }
            tracing::debug!("exiting search mode");
            state.exit_search();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            let query = state.active_query_mut();
            query.search_term.push(*c);
            tracing::trace!(query = %query.search_term, char = %c, "search term updated");
            state.selected_index = 0;
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            state.active_query_mut().search_term.pop();
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::CycleLevel | Event::CycleType | Event::CycleVerified => {
            let key = match event {
                Event::CycleLevel => FilterKey::Level,
                Event::CycleType => FilterKey::Type,
                _ => FilterKey::Verified,
            };
            let Some(field) = state.active_list().filter_field(key) else {
                return Ok((false, vec![]));
            };
            Ok((state.cycle_filter(field), vec![]))
        }
        Event::ToggleLayer(layer) => {
            if state.page != Page::Map {
                return Ok((false, vec![]));
            }
            state.layers.toggle(*layer);
            tracing::debug!(layer = layer.id(), visible = state.layers.contains(*layer), "layer toggled");
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::Reload => {
            tracing::info!(data_file = ?state.data_file, "reloading dataset");
            state.load_state = LoadState::Loading;
            state.notice = None;
            state.selected_index = 0;
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::load_dataset(
                    state.data_file.clone(),
                ))],
            ))
        }
        Event::Tick(now) => {
            state.now = *now;
            Ok((state.dataset().is_some(), vec![]))
        }
        Event::WorkerResponse(response) => Ok((handle_worker_response(state, response), vec![])),
    }
}

/// Applies a worker response and returns whether the view changed.
fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> bool {
    match response {
        WorkerResponse::DatasetLoaded { dataset } => {
            tracing::debug!(records = dataset.record_count(), "dataset received");
            state.load_state = LoadState::Ready(dataset.clone());
            state.clamp_selection();
            true
        }
        WorkerResponse::LoadFailed { message } => {
            tracing::warn!(error = %message, "dataset load failed");
            state.load_state = LoadState::Failed(message.clone());
            state.selected_index = 0;
            true
        }
        WorkerResponse::AlertSaved { alert } => {
            state.notice = Some(format!("Saved alert \"{}\"", alert.title));
            true
        }
        WorkerResponse::ResourceSaved { resource } => {
            state.notice = Some(format!("Saved resource \"{}\"", resource.name));
            true
        }
        WorkerResponse::Deleted { kind, id } => {
            state.notice = Some(format!("Deleted {kind} {id}"));
            true
        }
        WorkerResponse::VolunteerRegistered { volunteer } => {
            state.notice = Some(format!("Registered volunteer {}", volunteer.name));
            true
        }
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            state.notice = Some(message.clone());
            true
        }
    }
}
