//! Input modes and page navigation state.
//!
//! These enums decide which keybindings are active and which list the
//! dashboard shows.
//!
//! # State Machine
//!
//! The application operates in one of two input modes:
//! - **Normal**: navigation, page switching, filter cycling
//! - **Search**: typing a search term or moving through its results
//!
//! Independently, [`Page`] selects one of the five dashboard pages and
//! [`AlertsTab`] selects the sub-list shown on the alerts page.
//!
//! # Example
//!
//! ```rust
//! use reliefboard::app::modes::{InputMode, Page, SearchFocus};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! assert_eq!(Page::Overview.next(), Page::Alerts);
//! assert_eq!(Page::Overview.prev(), Page::Volunteers);
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters go into the search term.
    Typing,

    /// j/k move through the filtered results; `/` returns to typing.
    Navigating,
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search with its focus state.
    Search(SearchFocus),
}

/// Dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Critical alerts and the latest weather warning.
    Overview,
    /// Emergency alerts, weather warnings and contacts.
    Alerts,
    /// Relief resources.
    Resources,
    /// Located items filtered by map layer.
    Map,
    /// Volunteer directory.
    Volunteers,
}

impl Page {
    /// Pages in tab order.
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::Alerts,
        Self::Resources,
        Self::Map,
        Self::Volunteers,
    ];

    /// Configuration id, as accepted by the `start_page` option.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Alerts => "alerts",
            Self::Resources => "resources",
            Self::Map => "map",
            Self::Volunteers => "volunteers",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|page| page.id().eq_ignore_ascii_case(id))
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Alerts => "Alerts & Warnings",
            Self::Resources => "Resources",
            Self::Map => "Map",
            Self::Volunteers => "Volunteers",
        }
    }

    /// Short label used in the page tab bar.
    #[must_use]
    pub const fn tab_label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Alerts => "Alerts",
            Self::Resources => "Resources",
            Self::Map => "Map",
            Self::Volunteers => "Volunteers",
        }
    }

    /// The page after this one, wrapping to the first.
    #[must_use]
    pub fn next(self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// The page before this one, wrapping to the last.
    #[must_use]
    pub fn prev(self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|page| *page == self).unwrap_or(0)
    }
}

/// Sub-list shown on the alerts page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertsTab {
    Emergency,
    Weather,
    Contacts,
}

impl AlertsTab {
    pub const ALL: [Self; 3] = [Self::Emergency, Self::Weather, Self::Contacts];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Emergency => "Emergency Alerts",
            Self::Weather => "Weather Alerts",
            Self::Contacts => "Emergency Contacts",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Emergency => Self::Weather,
            Self::Weather => Self::Contacts,
            Self::Contacts => Self::Emergency,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Emergency => Self::Contacts,
            Self::Weather => Self::Emergency,
            Self::Contacts => Self::Weather,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cycle_wraps() {
        let mut page = Page::Overview;
        for _ in 0..Page::ALL.len() {
            page = page.next();
        }
        assert_eq!(page, Page::Overview);
        assert_eq!(Page::Volunteers.next(), Page::Overview);
        assert_eq!(Page::Alerts.prev(), Page::Overview);
    }

    #[test]
    fn test_page_from_id() {
        assert_eq!(Page::from_id("map"), Some(Page::Map));
        assert_eq!(Page::from_id(" Volunteers "), Some(Page::Volunteers));
        assert_eq!(Page::from_id("settings"), None);
    }

    #[test]
    fn test_alerts_tab_cycle() {
        assert_eq!(AlertsTab::Contacts.next(), AlertsTab::Emergency);
        assert_eq!(AlertsTab::Emergency.prev(), AlertsTab::Contacts);
        assert_eq!(AlertsTab::Weather.next().prev(), AlertsTab::Weather);
    }
}
