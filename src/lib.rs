//! ReliefBoard: a Zellij dashboard for disaster-response coordination.
//!
//! ReliefBoard shows, in a floating pane:
//! - Emergency alerts, weather warnings and emergency contacts
//! - Relief resources (water, shelter, medical stations)
//! - A volunteer directory
//! - A map page listing located items by toggleable layer
//!
//! Every list can be searched and narrowed with categorical filters. The data
//! comes from a JSON file or from built-in sample data, loaded off the UI
//! thread by a Zellij worker.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (query/)      │   │ (worker/)     │
//! │ - Rendering   │   │ - Filtering   │   │ - Bulk load   │
//! │ - Theming     │   │ - Map layers  │   │ - Writes      │
//! │ - Presentation│   │               │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                  │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage & Domain Layers                            │
//! │  - Data sources: JSON file, sample data (storage/)  │
//! │  - Records, tags, time formatting (domain/)         │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a JSON Lines span log   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Write requests
//!
//! No key binding posts a write: the dashboard is a read-only view. The
//! worker still accepts the write messages (`CreateAlert`, `UpdateAlert`,
//! `DeleteAlert`, `CreateResource`, `UpdateResource`, `DeleteResource` and
//! `RegisterVolunteer`) for host plugins that embed this crate and forward
//! edits to the configured data source. Their results arrive as a footer
//! notice. The loaded snapshot only changes on the next reload.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/reliefboard.wasm" {
//!         data_file "~/relief/dataset.json"
//!         theme "relief-dark"
//!         start_page "alerts"
//!         clock_interval "30"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse [`Config`], initialize tracing,
//!    build the [`AppState`] with [`initialize`], request permissions.
//! 2. **Permissions Granted**: post `LoadDataset` to the worker and start
//!    the clock timer.
//! 3. **Worker**: read all five collections concurrently, validate, reply
//!    with `DatasetLoaded` or a single `LoadFailed`.
//! 4. **UI**: every render derives the view model from the snapshot and the
//!    current query state.
//!
//! # Example
//!
//! ```rust
//! use reliefboard::{handle_event, initialize, Config, Event};
//! use reliefboard::storage::fixtures;
//! use reliefboard::worker::WorkerResponse;
//!
//! let mut state = initialize(&Config::default());
//! let dataset = fixtures::dataset(state.now);
//!
//! handle_event(&mut state, &Event::WorkerResponse(WorkerResponse::DatasetLoaded { dataset }))?;
//! handle_event(&mut state, &Event::NextPage)?;
//! handle_event(&mut state, &Event::CycleLevel)?;
//! assert_eq!(state.row_count(), 2);
//! # Ok::<(), reliefboard::ReliefError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod query;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, LoadState, Page, SearchFocus};
pub use domain::{Dataset, ReliefError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default seconds between clock ticks.
pub const DEFAULT_CLOCK_INTERVAL: u64 = 30;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/reliefboard.wasm" {
///     data_file "~/relief/dataset.json"
///     theme "relief-light"
///     theme_file "/path/to/theme.toml"
///     start_page "map"
///     clock_interval "60"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON dataset to load. `None` uses the built-in sample data.
    ///
    /// `~` maps to the host home directory; other relative paths resolve
    /// against the plugin data directory.
    pub data_file: Option<String>,

    /// Built-in theme name: `relief-dark` or `relief-light`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for the span log. Default: `"info"`
    pub trace_level: Option<String>,

    /// Page shown after loading.
    pub start_page: Page,

    /// Seconds between clock ticks that refresh relative times. At least 1.
    pub clock_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            start_page: Page::Overview,
            clock_interval: DEFAULT_CLOCK_INTERVAL,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset. An unknown `start_page` or an
    /// unparsable `clock_interval` falls back to the default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use reliefboard::{Config, Page};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_file".to_string(), "~/relief.json".to_string());
    /// map.insert("start_page".to_string(), "Volunteers".to_string());
    /// map.insert("clock_interval".to_string(), "0".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.data_file.as_deref(), Some("~/relief.json"));
    /// assert_eq!(config.start_page, Page::Volunteers);
    /// assert_eq!(config.clock_interval, 1);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let start_page = get("start_page")
            .and_then(|id| Page::from_id(&id))
            .unwrap_or(Page::Overview);

        let clock_interval = get("clock_interval")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_CLOCK_INTERVAL)
            .max(1);

        Self {
            data_file: get("data_file"),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
            start_page,
            clock_interval,
        }
    }

    /// Resolves the theme: `theme_file` first, then `theme_name`, then the
    /// default. Failures are logged and fall through to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                }
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from `config`.
///
/// The state starts in `Loading` on the configured page with the clock set
/// to now; the dataset arrives later from the worker.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing reliefboard plugin");

    let mut state = AppState::new(config.theme(), chrono::Utc::now());
    state.data_file.clone_from(&config.data_file);
    state.set_page(config.start_page);
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.clock_interval, 30);
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = Config::from_zellij(&map(&[("data_file", "  "), ("theme", "")]));
        assert!(config.data_file.is_none());
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("start_page", "settings"),
            ("clock_interval", "soon"),
        ]));
        assert_eq!(config.start_page, Page::Overview);
        assert_eq!(config.clock_interval, DEFAULT_CLOCK_INTERVAL);
    }

    #[test]
    fn test_theme_resolution() {
        let config = Config::from_zellij(&map(&[("theme", "relief-light")]));
        assert_eq!(config.theme().name, "relief-light");

        let config = Config::from_zellij(&map(&[("theme", "neon")]));
        assert_eq!(config.theme().name, "relief-dark");

        let config = Config::from_zellij(&map(&[
            ("theme", "relief-light"),
            ("theme_file", "/nonexistent/theme.toml"),
        ]));
        assert_eq!(config.theme().name, "relief-light");
    }

    #[test]
    fn test_initialize_uses_start_page() {
        let config = Config::from_zellij(&map(&[
            ("start_page", "map"),
            ("data_file", "dataset.json"),
        ]));
        let state = initialize(&config);
        assert_eq!(state.page, Page::Map);
        assert_eq!(state.load_state, LoadState::Loading);
        assert_eq!(state.data_file.as_deref(), Some("dataset.json"));
    }
}
