//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the reliefboard library
//! and the Zellij plugin system. It implements `ZellijPlugin`, registers the
//! data worker and translates Zellij events into library events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  ReliefWorker    │   │  ← Dataset load, writes
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `CustomMessage`, `Timer` events
//! 3. **Permissions granted**: Post `LoadDataset` to the worker
//! 4. **Clock**: Every `clock_interval` seconds a `Timer` event advances the
//!    clock so relative times stay current
//! 5. **Render**: Call library render function
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//! - `Tab` / `Shift+Tab`: Next / previous page
//! - `Esc`: Leave search
//!
//! In normal mode and while navigating search results:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `[` / `]`: Previous / next alerts sub-tab
//! - `l` / `t` / `v`: Cycle level, type and verified filters
//! - `1`-`4`: Toggle map layers (map page)
//! - `r`: Reload the dataset
//! - `/`: Enter search mode, or return to the search input
//! - `q`: Close plugin (normal mode only)
//!
//! While typing a search term:
//! - Any character: Append to the term
//! - `Backspace`: Delete the last character
//! - `Enter`: Move focus to the results

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::prelude::Event as ZellijEvent;
use zellij_tile::shim::post_message_to;

use reliefboard::query::Layer;
use reliefboard::worker::{ReliefWorker, WorkerMessage, WorkerResponse};
use reliefboard::{handle_event, Action, Config, Event, InputMode, SearchFocus};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(ReliefWorker, reliefboard_worker, RELIEFBOARD_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns: worker
/// messaging and the clock timer.
struct State {
    /// Core application state from library layer.
    app: reliefboard::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Seconds between clock ticks.
    clock_interval: u64,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: reliefboard::initialize(&default_config),
            worker_name: "reliefboard".to_string(),
            clock_interval: default_config.clock_interval,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes application state, requests
    /// permissions and subscribes to events. The dataset is requested once
    /// permissions are granted.
    ///
    /// # Permissions
    ///
    /// - `ReadApplicationState`: Receive plugin events
    /// - `ChangeApplicationState`: Hide the plugin pane
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        reliefboard::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            data_file = ?config.data_file,
            start_page = config.start_page.id(),
            clock_interval = config.clock_interval,
            "parsed configuration"
        );
        self.app = reliefboard::initialize(&config);
        self.clock_interval = config.clock_interval;

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        self.arm_clock();

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs it through `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: ZellijEvent) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!(
            "plugin_update",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        );
        let _guard = span.entered();

        match self.translate_event(event) {
            Some(app_event) => self.dispatch(&app_event),
            None => false,
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        reliefboard::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn translate_event(&self, event: ZellijEvent) -> Option<Event> {
        match event {
            ZellijEvent::Key(key) => self.map_key_event(&key),
            ZellijEvent::CustomMessage(name, payload) => {
                self.map_custom_message_event(&name, &payload)
            }
            ZellijEvent::Timer(_elapsed) => {
                self.arm_clock();
                Some(Event::Tick(chrono::Utc::now()))
            }
            ZellijEvent::PermissionRequestResult(status) => Self::map_permission_result(status),
            _ => None,
        }
    }

    fn dispatch(&mut self, event: &Event) -> bool {
        let (should_render, actions) = match handle_event(&mut self.app, event) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, event = ?event, "event handling failed");
                return false;
            }
        };

        tracing::debug!(actions = actions.len(), should_render, "event handled");
        for action in &actions {
            self.execute_action(action);
        }
        should_render
    }

    /// Schedules the next clock tick.
    #[allow(clippy::cast_precision_loss)]
    fn arm_clock(&self) {
        set_timeout(self.clock_interval as f64);
    }

    fn get_event_name(event: &ZellijEvent) -> String {
        match event {
            ZellijEvent::Key(key) => format!("Key({:?})", key.bare_key),
            ZellijEvent::CustomMessage(name, _) => format!("CustomMessage({name})"),
            ZellijEvent::Timer(..) => "Timer".to_string(),
            ZellijEvent::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// While typing a search term every printable key goes into the term;
    /// otherwise letters act as commands.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => {
                return Some(Event::PrevPage)
            }
            BareKey::Tab => return Some(Event::NextPage),
            BareKey::Esc => {
                return match self.app.input_mode {
                    InputMode::Search(_) => Some(Event::ExitSearch),
                    InputMode::Normal => None,
                }
            }
            BareKey::Down => return Some(Event::KeyDown),
            BareKey::Up => return Some(Event::KeyUp),
            BareKey::Backspace => return Some(Event::Backspace),
            _ => {}
        }

        if self.app.input_mode == InputMode::Search(SearchFocus::Typing) {
            return match key.bare_key {
                BareKey::Enter => Some(Event::FocusResults),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Char('j') => Event::KeyDown,
            BareKey::Char('k') => Event::KeyUp,
            BareKey::Char('[') => Event::PrevTab,
            BareKey::Char(']') => Event::NextTab,
            BareKey::Char('/') => match self.app.input_mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            BareKey::Char('l') => Event::CycleLevel,
            BareKey::Char('t') => Event::CycleType,
            BareKey::Char('v') => Event::CycleVerified,
            BareKey::Char('r') => Event::Reload,
            BareKey::Char('q') if self.app.input_mode == InputMode::Normal => Event::CloseFocus,
            BareKey::Char(c @ '1'..='4') => {
                let index = c.to_digit(10)? as usize - 1;
                Event::ToggleLayer(*Layer::ALL.get(index)?)
            }
            _ => return None,
        })
    }

    /// A grant triggers the first load. After a denial the plugin stays in
    /// its loading state.
    fn map_permission_result(status: PermissionStatus) -> Option<Event> {
        if matches!(status, PermissionStatus::Granted) {
            tracing::debug!("permissions granted - loading dataset");
            Some(Event::Reload)
        } else {
            tracing::warn!("permissions denied - dataset will not load");
            None
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Posts a message to the worker thread.
    ///
    /// Serialization errors are logged and the message is dropped.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(ref message) => {
                self.post_worker_message(message);
            }
        }
    }
}
