//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! display-ready data only: strings are already formatted and truncated, and
//! highlight ranges point into those final strings.

use crate::ui::presentation::{IconKind, StyleClass};
use std::ops::Range;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Page tab bar, one entry per page.
    pub tabs: Vec<TabInfo>,

    /// Sub-tabs of the current page; empty when the page has none.
    pub sub_tabs: Vec<TabInfo>,

    /// Filter chips (categorical filters or map layers); `None` when the
    /// current list has no filters.
    pub filter_bar: Option<FilterBarInfo>,

    /// Present while in search mode.
    pub search_bar: Option<SearchBarInfo>,

    pub columns: ColumnHeaders,

    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Extra lines describing the selected record.
    pub selection_detail: Vec<String>,

    /// Replaces the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub is_active: bool,
}

/// Row of filter chips.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub chips: Vec<FilterChip>,
}

/// One filter control: the key that changes it and its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub key: char,
    pub label: String,
    /// The filter currently constrains the list (or the layer is shown).
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    /// Keystrokes go into the query rather than navigating results.
    pub is_typing: bool,
}

/// Table column titles for the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnHeaders {
    pub title: &'static str,
    pub badge: &'static str,
    pub meta: &'static str,
    pub detail: &'static str,
}

/// Colored label next to a row title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub style: StyleClass,
}

/// One table row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub icon: IconKind,
    pub style: StyleClass,
    pub title: String,

    /// Byte ranges of search matches in `title`.
    pub title_ranges: Vec<Range<usize>>,

    pub badge: Option<Badge>,

    /// Short right-hand column: relative time, phone number or position.
    pub meta: String,

    pub detail: String,

    /// Byte ranges of search matches in `detail`.
    pub detail_ranges: Vec<Range<usize>>,

    /// Lines shown under the table when this row is selected.
    pub extra: Vec<String>,

    pub is_selected: bool,
}

/// Why the table is empty.
///
/// The three cases stay distinct: a filter that matches nothing is not a
/// failed load, and neither is a load still in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// The dataset has not arrived yet.
    Loading,
    /// The dataset load failed with this message.
    LoadFailed(String),
    /// Data is loaded but the current filters match nothing.
    NoResults,
}

impl EmptyState {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Loading => "Loading data...",
            Self::LoadFailed(_) => "Failed to load data",
            Self::NoResults => "No results found",
        }
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        match self {
            Self::Loading => "Fetching alerts, resources and volunteers",
            Self::LoadFailed(message) => message,
            Self::NoResults => "Try adjusting your search or filters",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,

    /// Transient status line, e.g. the result of a write.
    pub notice: Option<String>,
}
