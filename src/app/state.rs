//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for transient UI state: the
//! loaded dataset snapshot, the current page, the query state of every list
//! and the map layers. Filtered rows are never stored; every view model is
//! derived from the immutable snapshot, so a query change is reflected on the
//! next render without any cache to invalidate.
//!
//! # Lists
//!
//! Each page (and each alerts sub-tab) shows one [`ListKind`]. Lists keep
//! their own [`FilterQuery`], so a level filter on the alerts tab survives a
//! detour through the resources page.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use reliefboard::app::{AppState, LoadState};
//! use reliefboard::storage::fixtures;
//! use reliefboard::ui::Theme;
//!
//! let now = Utc::now();
//! let mut state = AppState::new(Theme::default(), now);
//! state.load_state = LoadState::Ready(fixtures::dataset(now));
//! let viewmodel = state.compute_viewmodel(24, 100);
//! assert!(viewmodel.empty_state.is_none());
//! ```

use super::modes::{AlertsTab, InputMode, Page, SearchFocus};
use crate::domain::tags::capitalize;
use crate::domain::time::{format_elapsed, format_remaining, format_window};
use crate::domain::{
    Alert, Dataset, EmergencyContact, GeoPoint, Resource, Severity, Volunteer, WeatherAlert,
};
use crate::query::{
    filter, map_items, match_ranges, visible, CategoricalField, FilterKey, FilterQuery,
    FilterValue, Filterable, LayerSet, MapItem,
};
use crate::ui::helpers::truncate;
use crate::ui::presentation::{
    classify_severity, contact_icon, map_icon, resource_icon, severity_label, verified_style,
    weather_icon, IconKind, StyleClass,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Badge, ColumnHeaders, DisplayItem, EmptyState, FilterBarInfo, FilterChip, FooterInfo,
    HeaderInfo, SearchBarInfo, TabInfo, UIViewModel,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// Width of the title column, including the icon and its trailing space.
pub const TITLE_COLUMN_WIDTH: usize = 32;
pub const BADGE_COLUMN_WIDTH: usize = 12;
pub const META_COLUMN_WIDTH: usize = 20;

/// Lines reserved under the table for the selected record's details.
pub const DETAIL_LINES: usize = 2;

static EMPTY_QUERY: FilterQuery = FilterQuery {
    search_term: String::new(),
    categorical: BTreeMap::new(),
};

/// Lifecycle of the dataset snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// A load is in flight; nothing is shown.
    #[default]
    Loading,
    /// The last load succeeded.
    Ready(Dataset),
    /// The last load failed. No stale data is kept.
    Failed(String),
}

/// The record list a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Overview,
    Alerts,
    Weather,
    Contacts,
    Resources,
    MapItems,
    Volunteers,
}

impl ListKind {
    /// Whether `/` search applies to this list.
    #[must_use]
    pub const fn is_searchable(self) -> bool {
        !matches!(self, Self::Overview | Self::MapItems)
    }

    /// Categorical filters this list's records declare.
    #[must_use]
    pub fn categorical_fields(self) -> &'static [CategoricalField] {
        match self {
            Self::Alerts => Alert::CATEGORICAL_FIELDS,
            Self::Weather => WeatherAlert::CATEGORICAL_FIELDS,
            Self::Contacts => EmergencyContact::CATEGORICAL_FIELDS,
            Self::Resources => Resource::CATEGORICAL_FIELDS,
            Self::Volunteers => Volunteer::CATEGORICAL_FIELDS,
            Self::Overview | Self::MapItems => &[],
        }
    }

    /// Name of the filter cycled from `key`, if this list has one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reliefboard::app::ListKind;
    /// use reliefboard::query::FilterKey;
    ///
    /// assert_eq!(ListKind::Weather.filter_field(FilterKey::Level), Some("severity"));
    /// assert_eq!(ListKind::Contacts.filter_field(FilterKey::Verified), None);
    /// ```
    #[must_use]
    pub fn filter_field(self, key: FilterKey) -> Option<&'static str> {
        self.categorical_fields()
            .iter()
            .find(|field| field.key == Some(key))
            .map(|field| field.name)
    }

    /// Values a categorical filter of this list can take, in cycling order,
    /// excluding `all`. Empty when the list does not declare `field`.
    #[must_use]
    pub fn field_options(self, field: &str) -> &'static [&'static str] {
        self.categorical_fields()
            .iter()
            .find(|declared| declared.name == field)
            .map_or(&[], |declared| declared.values)
    }

    const fn columns(self) -> ColumnHeaders {
        let (title, badge, meta, detail) = match self {
            Self::Overview => ("ALERT", "LEVEL", "WHEN", "DETAILS"),
            Self::Alerts => ("ALERT", "LEVEL", "REPORTED", "DESCRIPTION"),
            Self::Weather => ("WARNING", "SEVERITY", "REMAINING", "DESCRIPTION"),
            Self::Contacts => ("CONTACT", "CATEGORY", "PHONE", "DESCRIPTION"),
            Self::Resources => ("RESOURCE", "STATUS", "POSTED", "DESCRIPTION"),
            Self::MapItems => ("ITEM", "LAYER", "POSITION", "DESCRIPTION"),
            Self::Volunteers => ("VOLUNTEER", "STATUS", "PHONE", "SKILLS"),
        };
        ColumnHeaders {
            title,
            badge,
            meta,
            detail,
        }
    }
}

const fn key_char(key: FilterKey) -> char {
    match key {
        FilterKey::Level => 'l',
        FilterKey::Type => 't',
        FilterKey::Verified => 'v',
    }
}

const fn key_hint(key: FilterKey) -> &'static str {
    match key {
        FilterKey::Level => "l: level",
        FilterKey::Type => "t: type",
        FilterKey::Verified => "v: verified",
    }
}

fn field_label(field: &str) -> String {
    capitalize(field)
}

fn value_label(field: &str, value: &FilterValue) -> String {
    match (field, value.as_only()) {
        (_, None) => "All".to_string(),
        ("verified", Some("true")) => "Verified".to_string(),
        ("verified", Some("false")) => "Unverified".to_string(),
        (_, Some(raw)) => capitalize(raw),
    }
}

fn place(address: Option<&str>, point: GeoPoint) -> String {
    address.map_or_else(
        || format!("{:.4}, {:.4}", point.lat, point.lng),
        String::from,
    )
}

const fn verified_label(verified: bool) -> &'static str {
    if verified {
        "Verified"
    } else {
        "Unverified"
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dataset snapshot lifecycle.
    pub load_state: LoadState,

    pub page: Page,

    /// Sub-list shown on the alerts page.
    pub alerts_tab: AlertsTab,

    pub input_mode: InputMode,

    /// Query state per list. Lists without an entry use the identity query.
    pub queries: HashMap<ListKind, FilterQuery>,

    /// Active map layers. Reset whenever the map page is entered.
    pub layers: LayerSet,

    /// Zero-based index of the selected row in the current list.
    pub selected_index: usize,

    /// Clock used for every relative time on screen.
    pub now: DateTime<Utc>,

    /// JSON dataset file to load from; `None` uses the sample data.
    pub data_file: Option<String>,

    /// Transient status message shown above the footer.
    pub notice: Option<String>,

    pub theme: Theme,
}

impl AppState {
    /// Creates a state waiting for its first load, on the overview page.
    ///
    /// # Parameters
    ///
    /// * `theme` - Resolved color theme
    /// * `now` - Initial clock; later ticks replace it
    #[must_use]
    pub fn new(theme: Theme, now: DateTime<Utc>) -> Self {
        Self {
            load_state: LoadState::Loading,
            page: Page::Overview,
            alerts_tab: AlertsTab::Emergency,
            input_mode: InputMode::Normal,
            queries: HashMap::new(),
            layers: LayerSet::default(),
            selected_index: 0,
            now,
            data_file: None,
            notice: None,
            theme,
        }
    }

    /// The loaded dataset, if the last load succeeded.
    #[must_use]
    pub const fn dataset(&self) -> Option<&Dataset> {
        match &self.load_state {
            LoadState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    /// The list shown by the current page and tab.
    #[must_use]
    pub const fn active_list(&self) -> ListKind {
        match self.page {
            Page::Overview => ListKind::Overview,
            Page::Alerts => match self.alerts_tab {
                AlertsTab::Emergency => ListKind::Alerts,
                AlertsTab::Weather => ListKind::Weather,
                AlertsTab::Contacts => ListKind::Contacts,
            },
            Page::Resources => ListKind::Resources,
            Page::Map => ListKind::MapItems,
            Page::Volunteers => ListKind::Volunteers,
        }
    }

    /// Query state of `list`.
    #[must_use]
    pub fn query(&self, list: ListKind) -> &FilterQuery {
        self.queries.get(&list).unwrap_or(&EMPTY_QUERY)
    }

    /// Query state of the active list, for modification.
    pub fn active_query_mut(&mut self) -> &mut FilterQuery {
        self.queries.entry(self.active_list()).or_default()
    }

    /// Switches page, leaving search mode and resetting the selection.
    pub fn set_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        self.exit_search();
        self.page = page;
        self.selected_index = 0;
        if page == Page::Map {
            self.layers = LayerSet::default();
        }
        tracing::debug!(page = page.id(), "page changed");
    }

    /// Switches the alerts sub-tab, leaving search mode.
    pub fn set_alerts_tab(&mut self, tab: AlertsTab) {
        self.exit_search();
        self.alerts_tab = tab;
        self.selected_index = 0;
    }

    /// Leaves search mode and clears the active list's search term.
    pub fn exit_search(&mut self) {
        if matches!(self.input_mode, InputMode::Search(_)) {
            self.input_mode = InputMode::Normal;
            self.active_query_mut().search_term.clear();
            self.clamp_selection();
        }
    }

    /// Advances the categorical filter `field` of the active list to its next
    /// value: `all`, then every known value, then back to `all`.
    ///
    /// # Parameters
    ///
    /// * `field` - Filter name as declared by the list's record type
    ///
    /// # Returns
    ///
    /// `false` when the list has no such filter; the state is then unchanged
    ///
    /// # Example
    ///
    /// ```rust
    /// # use chrono::Utc;
    /// # use reliefboard::app::{AppState, LoadState, Page};
    /// # use reliefboard::storage::fixtures;
    /// # use reliefboard::ui::Theme;
    /// let mut state = AppState::new(Theme::default(), Utc::now());
    /// state.load_state = LoadState::Ready(fixtures::dataset(Utc::now()));
    /// state.set_page(Page::Resources);
    ///
    /// assert!(state.cycle_filter("verified"));
    /// assert!(!state.cycle_filter("level"));
    /// ```
    pub fn cycle_filter(&mut self, field: &str) -> bool {
        let options = self.active_list().field_options(field);
        if options.is_empty() {
            return false;
        }

        let query = self.active_query_mut();
        let current = query.filter_value(field);
        let next = match current.as_only() {
            None => FilterValue::parse(options[0]),
            Some(value) => options
                .iter()
                .position(|option| *option == value)
                .and_then(|index| options.get(index + 1))
                .map_or(FilterValue::All, |option| FilterValue::parse(option)),
        };

        tracing::debug!(field = field, value = %next, "filter cycled");
        query.set_filter(field, next);
        self.clamp_selection();
        true
    }

    /// Moves selection down by one row, wrapping to the top.
    ///
    /// Does nothing on an empty list.
    pub fn move_selection_down(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves selection up by one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the selection inside the current list after it shrank.
    pub fn clamp_selection(&mut self) {
        let count = self.row_count();
        self.selected_index = if count == 0 {
            0
        } else {
            self.selected_index.min(count - 1)
        };
    }

    /// Number of rows in the current list after filtering.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    /// Rows of the current list after filtering, none of them selected.
    ///
    /// Empty until a dataset is loaded.
    #[must_use]
    pub fn rows(&self) -> Vec<DisplayItem> {
        let Some(data) = self.dataset() else {
            return vec![];
        };

        let list = self.active_list();
        let query = self.query(list);
        let term = query.search_term.as_str();

        let _span = tracing::debug_span!("compute_rows", list = ?list).entered();

        match list {
            ListKind::Overview => self.overview_rows(data),
            ListKind::Alerts => filter(&data.alerts, query)
                .into_iter()
                .map(|alert| self.alert_row(alert, term))
                .collect(),
            ListKind::Weather => filter(&data.weather_alerts, query)
                .into_iter()
                .map(|warning| self.weather_row(warning, term))
                .collect(),
            ListKind::Contacts => filter(&data.contacts, query)
                .into_iter()
                .map(|contact| Self::contact_row(contact, term))
                .collect(),
            ListKind::Resources => filter(&data.resources, query)
                .into_iter()
                .map(|resource| self.resource_row(resource, term))
                .collect(),
            ListKind::MapItems => {
                let items = map_items(data);
                visible(&items, &self.layers)
                    .into_iter()
                    .map(Self::map_row)
                    .collect()
            }
            ListKind::Volunteers => filter(&data.volunteers, query)
                .into_iter()
                .map(|volunteer| Self::volunteer_row(volunteer, term))
                .collect(),
        }
    }

    fn overview_rows(&self, data: &Dataset) -> Vec<DisplayItem> {
        let mut rows: Vec<DisplayItem> = data
            .alerts
            .iter()
            .filter(|alert| alert.is_critical())
            .map(|alert| self.alert_row(alert, ""))
            .collect();

        if rows.is_empty() {
            let shown = classify_severity(&Severity::Low);
            rows.push(DisplayItem {
                icon: shown.icon,
                style: shown.style,
                title: "No Critical Alerts".to_string(),
                title_ranges: vec![],
                badge: None,
                meta: String::new(),
                detail: "There are currently no critical alerts in your area.".to_string(),
                detail_ranges: vec![],
                extra: vec![],
                is_selected: false,
            });
        }

        if let Some(latest) = data.weather_alerts.first() {
            rows.push(self.weather_row(latest, ""));
        }

        rows
    }

    fn alert_row(&self, alert: &Alert, term: &str) -> DisplayItem {
        let shown = classify_severity(&alert.level);
        let title = truncate(&alert.title, TITLE_COLUMN_WIDTH - 4);
        DisplayItem {
            icon: shown.icon,
            style: shown.style,
            title_ranges: match_ranges(&title, term),
            title,
            badge: Some(Badge {
                label: severity_label(&alert.level).to_string(),
                style: shown.style,
            }),
            meta: format_elapsed(alert.timestamp, self.now),
            detail_ranges: match_ranges(&alert.description, term),
            detail: alert.description.clone(),
            extra: vec![
                format!(
                    "Location: {}",
                    place(alert.location.address.as_deref(), alert.location.point())
                ),
                format!(
                    "Type: {}  Source: {}",
                    alert.disaster_type.label(),
                    alert.source.label()
                ),
            ],
            is_selected: false,
        }
    }

    fn weather_row(&self, warning: &WeatherAlert, term: &str) -> DisplayItem {
        let shown = classify_severity(&warning.severity);
        let title = truncate(&warning.title, TITLE_COLUMN_WIDTH - 4);
        DisplayItem {
            icon: weather_icon(&warning.weather_type),
            style: shown.style,
            title_ranges: match_ranges(&title, term),
            title,
            badge: Some(Badge {
                label: severity_label(&warning.severity).to_string(),
                style: shown.style,
            }),
            meta: format_remaining(warning.end_time, self.now),
            detail_ranges: match_ranges(&warning.description, term),
            detail: warning.description.clone(),
            extra: vec![
                format!("Area: {}", warning.affected_area.name),
                format!("When: {}", format_window(warning.start_time, warning.end_time)),
            ],
            is_selected: false,
        }
    }

    fn contact_row(contact: &EmergencyContact, term: &str) -> DisplayItem {
        let title = truncate(&contact.name, TITLE_COLUMN_WIDTH - 4);
        let detail = contact.description.clone().unwrap_or_default();
        let mut extra = Vec::new();
        if let Some(address) = &contact.address {
            extra.push(format!("Address: {address}"));
        }
        if let Some(website) = &contact.website {
            extra.push(format!("Website: {website}"));
        }

        DisplayItem {
            icon: contact_icon(&contact.category),
            style: StyleClass::Info,
            title_ranges: match_ranges(&title, term),
            title,
            badge: Some(Badge {
                label: contact.category.label(),
                style: StyleClass::Muted,
            }),
            meta: contact.phone.clone(),
            detail_ranges: match_ranges(&detail, term),
            detail,
            extra,
            is_selected: false,
        }
    }

    fn resource_row(&self, resource: &Resource, term: &str) -> DisplayItem {
        let title = truncate(&resource.name, TITLE_COLUMN_WIDTH - 4);
        let style = verified_style(resource.verified);
        let mut contact = format!(
            "Contact: {} ({})",
            resource.contact_name,
            resource.phone_or_placeholder()
        );
        if let Some(quantity) = resource.quantity {
            contact.push_str(&format!("  Available: {quantity}"));
        }

        DisplayItem {
            icon: resource_icon(&resource.resource_type),
            style,
            title_ranges: match_ranges(&title, term),
            title,
            badge: Some(Badge {
                label: verified_label(resource.verified).to_string(),
                style,
            }),
            meta: format_elapsed(resource.timestamp, self.now),
            detail_ranges: match_ranges(&resource.description, term),
            detail: resource.description.clone(),
            extra: vec![
                format!("Address: {}", resource.location.address),
                contact,
            ],
            is_selected: false,
        }
    }

    fn map_row(item: &MapItem) -> DisplayItem {
        DisplayItem {
            icon: map_icon(item.kind),
            style: StyleClass::Info,
            title: truncate(&item.title, TITLE_COLUMN_WIDTH - 4),
            title_ranges: vec![],
            badge: Some(Badge {
                label: item.kind.layer().label().to_string(),
                style: StyleClass::Muted,
            }),
            meta: format!("{:.4}, {:.4}", item.position.lat, item.position.lng),
            detail: item.description.clone(),
            detail_ranges: vec![],
            extra: vec![],
            is_selected: false,
        }
    }

    fn volunteer_row(volunteer: &Volunteer, term: &str) -> DisplayItem {
        let title = truncate(&volunteer.name, TITLE_COLUMN_WIDTH - 4);
        let style = verified_style(volunteer.verified);
        let detail = volunteer.skill_summary();
        let availability = &volunteer.availability;

        let mut extra = vec![format!(
            "Available: {}{}",
            format_window(availability.start_date, availability.end_date),
            if availability.all_day { " (all day)" } else { "" }
        )];
        let mut reach = Vec::new();
        if let Some(email) = &volunteer.email {
            reach.push(format!("Email: {email}"));
        }
        if let Some(location) = &volunteer.location {
            reach.push(format!(
                "Location: {}",
                place(location.address.as_deref(), location.point())
            ));
        }
        if !reach.is_empty() {
            extra.push(reach.join("  "));
        }

        DisplayItem {
            icon: IconKind::User,
            style,
            title_ranges: match_ranges(&title, term),
            title,
            badge: Some(Badge {
                label: verified_label(volunteer.verified).to_string(),
                style,
            }),
            meta: volunteer.phone.clone(),
            detail_ranges: match_ranges(&detail, term),
            detail,
            extra,
            is_selected: false,
        }
    }

    /// Computes the view model for a frame of `rows` x `cols` cells.
    ///
    /// Rows are windowed around the selection so the selected row stays
    /// visible however long the list is.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height, used to size the row window
    /// * `_cols` - Pane width; column layout is left to the renderer
    ///
    /// # Returns
    ///
    /// A view model holding only the visible rows. `empty_state` is set
    /// instead of rows while loading, after a failed load, or when the query
    /// matches nothing.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let list = self.active_list();
        let all_rows = self.rows();

        let empty_state = match &self.load_state {
            LoadState::Loading => Some(EmptyState::Loading),
            LoadState::Failed(message) => Some(EmptyState::LoadFailed(message.clone())),
            LoadState::Ready(_) if all_rows.is_empty() => Some(EmptyState::NoResults),
            LoadState::Ready(_) => None,
        };

        let filter_bar = self.compute_filter_bar(list);
        let search_bar = self.compute_search_bar(list);
        let sub_tabs = self.compute_sub_tabs();

        let available_rows = Self::calculate_available_rows(
            rows,
            !sub_tabs.is_empty(),
            filter_bar.is_some(),
            search_bar.is_some(),
        );

        let selected = self.selected_index.min(all_rows.len().saturating_sub(1));
        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(all_rows.len());
        if visible_end - visible_start < available_rows && all_rows.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let display_items: Vec<DisplayItem> = all_rows
            .into_iter()
            .enumerate()
            .skip(visible_start)
            .take(visible_end - visible_start)
            .map(|(index, mut item)| {
                item.is_selected = index == selected;
                item
            })
            .collect();

        let selected_index = selected.saturating_sub(visible_start);
        let selection_detail = display_items
            .get(selected_index)
            .map(|item| item.extra.clone())
            .unwrap_or_default();

        UIViewModel {
            header: self.compute_header(),
            tabs: self.compute_tabs(),
            sub_tabs,
            filter_bar,
            search_bar,
            columns: list.columns(),
            display_items,
            selected_index,
            selection_detail,
            empty_state,
            footer: self.compute_footer(list),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let count = match &self.load_state {
            LoadState::Ready(_) => format!(" ({})", self.row_count()),
            _ => String::new(),
        };
        HeaderInfo {
            title: format!(
                " ReliefBoard | {}{count} | {} UTC ",
                self.page.title(),
                self.now.format("%-I:%M %p")
            ),
        }
    }

    fn compute_tabs(&self) -> Vec<TabInfo> {
        Page::ALL
            .iter()
            .map(|page| TabInfo {
                label: page.tab_label().to_string(),
                is_active: *page == self.page,
            })
            .collect()
    }

    fn compute_sub_tabs(&self) -> Vec<TabInfo> {
        if self.page != Page::Alerts {
            return vec![];
        }
        AlertsTab::ALL
            .iter()
            .map(|tab| TabInfo {
                label: tab.label().to_string(),
                is_active: *tab == self.alerts_tab,
            })
            .collect()
    }

    fn compute_filter_bar(&self, list: ListKind) -> Option<FilterBarInfo> {
        if list == ListKind::MapItems {
            let chips = crate::query::Layer::ALL
                .iter()
                .zip(['1', '2', '3', '4'])
                .map(|(layer, key)| FilterChip {
                    key,
                    label: layer.label().to_string(),
                    is_active: self.layers.contains(*layer),
                })
                .collect();
            return Some(FilterBarInfo { chips });
        }

        let query = self.query(list);
        let chips: Vec<FilterChip> = FilterKey::ALL
            .into_iter()
            .filter_map(|key| {
                let field = list.filter_field(key)?;
                let value = query.filter_value(field);
                Some(FilterChip {
                    key: key_char(key),
                    label: format!("{}: {}", field_label(field), value_label(field, &value)),
                    is_active: !value.is_all(),
                })
            })
            .collect();

        (!chips.is_empty()).then_some(FilterBarInfo { chips })
    }

    fn compute_search_bar(&self, list: ListKind) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.query(list).search_term.clone(),
                is_typing: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    fn compute_footer(&self, list: ListKind) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Search(SearchFocus::Typing) => {
                "ESC: exit search  Enter: browse results  Type to filter".to_string()
            }
            InputMode::Search(SearchFocus::Navigating) => {
                "ESC: exit search  /: edit query  j/k: navigate".to_string()
            }
            InputMode::Normal => {
                let mut parts = vec!["Tab: page", "j/k: navigate"];
                if self.page == Page::Alerts {
                    parts.push("[/]: tab");
                }
                if list.is_searchable() {
                    parts.push("/: search");
                }
                parts.extend(
                    FilterKey::ALL
                        .into_iter()
                        .filter(|key| list.filter_field(*key).is_some())
                        .map(key_hint),
                );
                if list == ListKind::MapItems {
                    parts.push("1-4: layers");
                }
                parts.extend(["r: reload", "q: quit"]);
                parts.join("  ")
            }
        };

        FooterInfo {
            keybindings,
            notice: self.notice.clone(),
        }
    }

    /// Rows left for the table after the header, tabs, optional bars, the
    /// detail block and the footer.
    ///
    /// # Parameters
    ///
    /// * `total_rows` - Pane height
    /// * `has_sub_tabs` - Alerts page sub-tab row is shown
    /// * `has_filter_bar` - Filter chip row is shown
    /// * `has_search_bar` - Three-line search box is shown
    const fn calculate_available_rows(
        total_rows: usize,
        has_sub_tabs: bool,
        has_filter_bar: bool,
        has_search_bar: bool,
    ) -> usize {
        let mut chrome = 8 + DETAIL_LINES;
        if has_sub_tabs {
            chrome += 1;
        }
        if has_filter_bar {
            chrome += 1;
        }
        if has_search_bar {
            chrome += 3;
        }
        total_rows.saturating_sub(chrome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 18, 15, 4, 0).unwrap()
    }

    fn ready_state() -> AppState {
        let mut state = AppState::new(Theme::default(), now());
        state.load_state = LoadState::Ready(fixtures::dataset(now()));
        state
    }

    fn titles(state: &AppState) -> Vec<String> {
        state.rows().into_iter().map(|row| row.title).collect()
    }

    #[test]
    fn test_overview_lists_critical_alerts_then_weather() {
        let state = ready_state();
        assert_eq!(
            titles(&state),
            vec!["Flash Flood Warning", "Family Trapped", "Flash Flood Warning"]
        );
        let rows = state.rows();
        assert_eq!(rows[0].meta, "30 minutes ago");
        assert_eq!(rows[2].meta, "12 hr remaining");
    }

    #[test]
    fn test_overview_placeholder_without_critical_alerts() {
        let mut state = ready_state();
        if let LoadState::Ready(data) = &mut state.load_state {
            data.alerts.retain(|alert| !alert.is_critical());
        }
        let rows = state.rows();
        assert_eq!(rows[0].title, "No Critical Alerts");
        assert_eq!(rows[0].style, StyleClass::Success);
    }

    #[test]
    fn test_cycle_level_filter() {
        let mut state = ready_state();
        state.set_page(Page::Alerts);
        assert_eq!(state.row_count(), 3);

        assert!(state.cycle_filter("level"));
        assert_eq!(
            state.query(ListKind::Alerts).filter_value("level"),
            FilterValue::parse("critical")
        );
        assert_eq!(titles(&state), vec!["Flash Flood Warning", "Family Trapped"]);

        assert!(state.cycle_filter("level"));
        assert_eq!(titles(&state), vec!["Road Closure"]);

        for _ in 0..3 {
            state.cycle_filter("level");
        }
        assert!(state.query(ListKind::Alerts).is_identity());
        assert_eq!(state.row_count(), 3);
    }

    #[test]
    fn test_cycle_unknown_field_is_rejected() {
        let mut state = ready_state();
        state.set_page(Page::Map);
        assert!(!state.cycle_filter("level"));
    }

    #[test]
    fn test_queries_are_kept_per_list() {
        let mut state = ready_state();
        state.set_page(Page::Alerts);
        state.cycle_filter("level");

        state.set_alerts_tab(AlertsTab::Weather);
        assert_eq!(state.row_count(), 2);

        state.set_alerts_tab(AlertsTab::Emergency);
        assert_eq!(state.row_count(), 2);
    }

    #[test]
    fn test_search_highlights_matches() {
        let mut state = ready_state();
        state.set_page(Page::Resources);
        state.active_query_mut().search_term = "shelter".to_string();

        let rows = state.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Temporary Shelter");
        assert_eq!(rows[0].title_ranges, vec![10..17]);
    }

    #[test]
    fn test_empty_states_are_distinct() {
        let mut state = AppState::new(Theme::default(), now());
        assert_eq!(
            state.compute_viewmodel(30, 100).empty_state,
            Some(EmptyState::Loading)
        );

        state.load_state = LoadState::Failed("Fetch error: offline".to_string());
        assert_eq!(
            state.compute_viewmodel(30, 100).empty_state,
            Some(EmptyState::LoadFailed("Fetch error: offline".to_string()))
        );

        state.load_state = LoadState::Ready(fixtures::dataset(now()));
        state.set_page(Page::Volunteers);
        state.active_query_mut().search_term = "nobody".to_string();
        assert_eq!(
            state.compute_viewmodel(30, 100).empty_state,
            Some(EmptyState::NoResults)
        );
    }

    #[test]
    fn test_map_page_resets_layers() {
        let mut state = ready_state();
        state.set_page(Page::Map);
        assert_eq!(state.row_count(), 8);

        state.layers.toggle(crate::query::Layer::Volunteers);
        assert_eq!(state.row_count(), 11);

        state.set_page(Page::Volunteers);
        state.set_page(Page::Map);
        assert_eq!(state.layers, LayerSet::default());
    }

    #[test]
    fn test_selection_window_follows_cursor() {
        let mut state = ready_state();
        state.set_page(Page::Alerts);
        state.selected_index = 2;

        let vm = state.compute_viewmodel(16, 100);
        let selected = &vm.display_items[vm.selected_index];
        assert!(selected.is_selected);
        assert_eq!(selected.title, "Family Trapped");
        assert_eq!(vm.selection_detail.len(), 2);
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = ready_state();
        state.set_page(Page::Resources);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_filter_bar_labels() {
        let mut state = ready_state();
        state.set_page(Page::Resources);
        state.cycle_filter("verified");

        let vm = state.compute_viewmodel(30, 100);
        let chips = vm.filter_bar.unwrap().chips;
        assert_eq!(chips[0].label, "Type: All");
        assert!(!chips[0].is_active);
        assert_eq!(chips[1].label, "Verified: Verified");
        assert!(chips[1].is_active);
    }

    #[test]
    fn test_list_filters_follow_record_declarations() {
        let lists = [
            ListKind::Alerts,
            ListKind::Weather,
            ListKind::Contacts,
            ListKind::Resources,
            ListKind::Volunteers,
        ];
        for list in lists {
            for field in list.categorical_fields() {
                assert_eq!(list.field_options(field.name), field.values);
                if let Some(key) = field.key {
                    assert_eq!(list.filter_field(key), Some(field.name));
                }
            }
        }

        assert_eq!(ListKind::Alerts.field_options("source"), &["official", "user", "system"]);
        assert!(ListKind::Overview.categorical_fields().is_empty());
        assert_eq!(ListKind::Volunteers.filter_field(FilterKey::Type), Some("skill"));

        let mut state = ready_state();
        state.set_page(Page::Volunteers);
        let vm = state.compute_viewmodel(30, 100);
        let keys: Vec<char> = vm.filter_bar.unwrap().chips.iter().map(|chip| chip.key).collect();
        assert_eq!(keys, vec!['t', 'v']);
        assert!(vm.footer.keybindings.contains("t: type  v: verified"));
    }
}
