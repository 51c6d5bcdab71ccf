//! Search-term and categorical filtering over record collections.
//!
//! A [`FilterQuery`] combines a free-text search term with named categorical
//! filters. [`filter`] keeps the records that satisfy every active predicate,
//! in their original order, and never copies or re-sorts the input.
//!
//! Which fields a search term looks at and which categorical filters exist is
//! declared per record type through the [`Filterable`] trait:
//!
//! | Record | Search fields | Categorical |
//! |---|---|---|
//! | `Alert` | title, description | `level`, `type`, `source` |
//! | `WeatherAlert` | title, description | `severity`, `type` |
//! | `Resource` | name, description, address | `type`, `verified` |
//! | `EmergencyContact` | name, description, address | `category` |
//! | `Volunteer` | name, address, skill names | `skill`, `verified` |
//!
//! A categorical filter with a name the record type does not declare matches
//! nothing, so a misspelt filter shows an empty list instead of silently
//! showing everything.

use crate::domain::{
    Alert, AlertSource, ContactCategory, DisasterType, EmergencyContact, Resource, ResourceType,
    Severity, Volunteer, VolunteerSkill, WeatherAlert, WeatherType,
};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// Sentinel value that disables a categorical filter.
pub const ALL: &str = "all";

/// Wire values of a boolean categorical field, in cycling order.
pub const VERIFIED_VALUES: &[&str] = &["true", "false"];

/// Interactive slot a categorical field is cycled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// Urgency: `level` on alerts, `severity` on weather warnings.
    Level,
    /// The kind of record: `type`, `category` or `skill`.
    Type,
    Verified,
}

impl FilterKey {
    pub const ALL: [Self; 3] = [Self::Level, Self::Type, Self::Verified];
}

/// Declaration of one categorical filter a record type accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoricalField {
    /// Filter name used in a [`FilterQuery`].
    pub name: &'static str,
    /// Slot the filter is cycled from, or `None` for a filter that can only
    /// be set programmatically.
    pub key: Option<FilterKey>,
    /// Known values, in cycling order, excluding `all`.
    pub values: &'static [&'static str],
}

impl CategoricalField {
    const fn new(name: &'static str, key: Option<FilterKey>, values: &'static [&'static str]) -> Self {
        Self { name, key, values }
    }
}

/// Value of one categorical filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    /// No constraint.
    #[default]
    All,
    /// The record field must equal this wire value.
    Only(String),
}

impl FilterValue {
    /// Parses a filter value, treating `"all"` as [`FilterValue::All`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Self::All
        } else {
            Self::Only(raw.to_string())
        }
    }

    /// Returns the constrained value, or `None` for [`FilterValue::All`].
    #[must_use]
    pub fn as_only(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_only().unwrap_or(ALL))
    }
}

/// The query state of one list: search term plus named categorical filters.
///
/// # Examples
///
/// ```
/// use reliefboard::query::filter::{FilterQuery, FilterValue};
///
/// let query = FilterQuery::new()
///     .with_search("flood")
///     .with_filter("level", FilterValue::parse("critical"));
/// assert!(!query.is_identity());
/// assert!(FilterQuery::new().with_filter("type", FilterValue::All).is_identity());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterQuery {
    pub search_term: String,
    pub categorical: BTreeMap<String, FilterValue>,
}

impl FilterQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_filter(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.set_filter(name, value);
        self
    }

    /// Sets or replaces the categorical filter called `name`.
    pub fn set_filter(&mut self, name: impl Into<String>, value: FilterValue) {
        self.categorical.insert(name.into(), value);
    }

    /// Current value of the filter called `name`; unset filters are `All`.
    #[must_use]
    pub fn filter_value(&self, name: &str) -> FilterValue {
        self.categorical.get(name).cloned().unwrap_or_default()
    }

    /// Returns `true` when the query constrains nothing: an empty search term
    /// and every categorical filter at `All`.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.search_term.is_empty() && self.categorical.values().all(FilterValue::is_all)
    }

    /// Tests a single record against every active predicate.
    #[must_use]
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.matches_search(record) && self.matches_categories(record)
    }

    fn matches_search<T: Filterable>(&self, record: &T) -> bool {
        self.search_term.is_empty()
            || record
                .search_fields()
                .into_iter()
                .any(|field| contains_ignore_case(field, &self.search_term))
    }

    fn matches_categories<T: Filterable>(&self, record: &T) -> bool {
        self.categorical.iter().all(|(name, value)| match value {
            FilterValue::All => true,
            FilterValue::Only(expected) => {
                T::declares(name) && record.field_matches(name, expected)
            }
        })
    }
}

/// A record type the filter engine can search and constrain.
pub trait Filterable {
    /// The categorical filters this type accepts.
    const CATEGORICAL_FIELDS: &'static [CategoricalField];

    /// Whether `name` is one of [`Filterable::CATEGORICAL_FIELDS`].
    fn declares(name: &str) -> bool {
        Self::CATEGORICAL_FIELDS.iter().any(|field| field.name == name)
    }

    /// Text fields a search term is matched against. Absent optional fields
    /// are left out.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether the categorical field `name` equals `value`. Undeclared names
    /// return `false`.
    fn field_matches(&self, name: &str, value: &str) -> bool;
}

/// Returns the records of `records` matching `query`, in input order.
///
/// The result borrows from the input; nothing is cloned or re-sorted. An
/// identity query returns every record.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use reliefboard::query::filter::{filter, FilterQuery, FilterValue};
/// use reliefboard::storage::fixtures;
///
/// let dataset = fixtures::dataset(Utc::now());
/// let query = FilterQuery::new().with_filter("level", FilterValue::parse("critical"));
/// let critical = filter(&dataset.alerts, &query);
/// assert!(critical.iter().all(|alert| alert.is_critical()));
/// ```
#[must_use]
pub fn filter<'a, T: Filterable>(records: &'a [T], query: &FilterQuery) -> Vec<&'a T> {
    let _span = tracing::debug_span!(
        "filter_records",
        input = records.len(),
        search_term = %query.search_term
    )
    .entered();

    let kept: Vec<&T> = records.iter().filter(|record| query.matches(*record)).collect();

    tracing::debug!(kept = kept.len(), "filter applied");
    kept
}

/// Case-insensitive substring test.
///
/// Agrees with [`match_ranges`]: a non-empty `term` is contained exactly when
/// it has at least one highlight range in `text`.
///
/// # Parameters
///
/// * `text` - The field being searched
/// * `term` - The search term; empty matches everything
///
/// # Returns
///
/// `true` when `term` occurs in `text`, ignoring case
#[must_use]
pub fn contains_ignore_case(text: &str, term: &str) -> bool {
    term.is_empty() || !match_ranges(text, term).is_empty()
}

/// Byte ranges of every non-overlapping, case-insensitive occurrence of
/// `term` in `text`, left to right. Ranges always fall on char boundaries of
/// `text`.
///
/// # Examples
///
/// ```
/// use reliefboard::query::filter::match_ranges;
///
/// assert_eq!(match_ranges("Flash Flood Warning", "fl"), vec![0..2, 6..8]);
/// assert!(match_ranges("Road Closure", "").is_empty());
/// ```
#[must_use]
pub fn match_ranges(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let rest = &text[start..];
        if let Some(len) = match_prefix(rest, &needle) {
            ranges.push(start..start + len);
            start += len;
        } else {
            start += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    ranges
}

/// Length in bytes of the shortest prefix of `haystack` whose lowercase form
/// starts with `needle`.
///
/// A char whose lowercase form is several chars (`İ` lowers to `i` plus a
/// combining dot) is covered whole even when the needle ends inside it.
fn match_prefix(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut pending = needle;
    for (offset, c) in haystack.char_indices() {
        for lower in c.to_lowercase() {
            match pending.split_first() {
                Some((first, rest)) if *first == lower => pending = rest,
                None => break,
                Some(_) => return None,
            }
        }
        if pending.is_empty() {
            return Some(offset + c.len_utf8());
        }
    }
    None
}

fn bool_matches(field: bool, value: &str) -> bool {
    value.parse::<bool>().is_ok_and(|expected| expected == field)
}

impl Filterable for Alert {
    const CATEGORICAL_FIELDS: &'static [CategoricalField] = &[
        CategoricalField::new("level", Some(FilterKey::Level), Severity::NAMES),
        CategoricalField::new("type", Some(FilterKey::Type), DisasterType::NAMES),
        CategoricalField::new("source", None, AlertSource::NAMES),
    ];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn field_matches(&self, name: &str, value: &str) -> bool {
        match name {
            "level" => self.level.as_str() == value,
            "type" => self.disaster_type.as_str() == value,
            "source" => self.source.as_str() == value,
            _ => false,
        }
    }
}

impl Filterable for WeatherAlert {
    const CATEGORICAL_FIELDS: &'static [CategoricalField] = &[
        CategoricalField::new("severity", Some(FilterKey::Level), Severity::NAMES),
        CategoricalField::new("type", Some(FilterKey::Type), WeatherType::NAMES),
    ];

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn field_matches(&self, name: &str, value: &str) -> bool {
        match name {
            "severity" => self.severity.as_str() == value,
            "type" => self.weather_type.as_str() == value,
            _ => false,
        }
    }
}

impl Filterable for Resource {
    const CATEGORICAL_FIELDS: &'static [CategoricalField] = &[
        CategoricalField::new("type", Some(FilterKey::Type), ResourceType::NAMES),
        CategoricalField::new("verified", Some(FilterKey::Verified), VERIFIED_VALUES),
    ];

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.location.address.as_str(),
        ]
    }

    fn field_matches(&self, name: &str, value: &str) -> bool {
        match name {
            "type" => self.resource_type.as_str() == value,
            "verified" => bool_matches(self.verified, value),
            _ => false,
        }
    }
}

impl Filterable for EmergencyContact {
    const CATEGORICAL_FIELDS: &'static [CategoricalField] = &[CategoricalField::new(
        "category",
        Some(FilterKey::Type),
        ContactCategory::NAMES,
    )];

    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.address.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn field_matches(&self, name: &str, value: &str) -> bool {
        match name {
            "category" => self.category.as_str() == value,
            _ => false,
        }
    }
}

impl Filterable for Volunteer {
    const CATEGORICAL_FIELDS: &'static [CategoricalField] = &[
        CategoricalField::new("skill", Some(FilterKey::Type), VolunteerSkill::NAMES),
        CategoricalField::new("verified", Some(FilterKey::Verified), VERIFIED_VALUES),
    ];

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(address) = self.location.as_ref().and_then(|l| l.address.as_deref()) {
            fields.push(address);
        }
        fields.extend(self.skills.iter().map(|skill| skill.as_str()));
        fields
    }

    fn field_matches(&self, name: &str, value: &str) -> bool {
        match name {
            "skill" => self.skills.iter().any(|skill| skill.as_str() == value),
            "verified" => bool_matches(self.verified, value),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dataset;
    use crate::storage::fixtures;
    use chrono::{TimeZone, Utc};

    fn dataset() -> Dataset {
        fixtures::dataset(Utc.with_ymd_and_hms(2024, 10, 18, 12, 0, 0).unwrap())
    }

    trait RecordId {
        fn record_id(&self) -> &str;
    }

    macro_rules! record_id {
        ($($ty:ty),+) => {
            $(impl RecordId for $ty {
                fn record_id(&self) -> &str {
                    &self.id
                }
            })+
        };
    }

    record_id!(Alert, Resource, Volunteer, WeatherAlert);

    fn ids<'a, T: RecordId>(records: &[&'a T]) -> Vec<&'a str> {
        records.iter().map(|r| r.record_id()).collect()
    }

    #[test]
    fn test_filter_value_parse() {
        assert_eq!(FilterValue::parse("all"), FilterValue::All);
        assert_eq!(
            FilterValue::parse("critical"),
            FilterValue::Only("critical".to_string())
        );
        assert_eq!(FilterValue::parse("All").to_string(), "All");
        assert_eq!(FilterValue::All.to_string(), "all");
    }

    #[test]
    fn test_identity_query_keeps_everything() {
        let data = dataset();
        let query = FilterQuery::new().with_filter("level", FilterValue::All);
        assert!(query.is_identity());

        let kept = filter(&data.alerts, &query);
        assert_eq!(kept.len(), data.alerts.len());
        assert!(kept.iter().zip(&data.alerts).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let data = dataset();

        let by_title = filter(&data.alerts, &FilterQuery::new().with_search("CLOSURE"));
        assert_eq!(ids(&by_title), vec!["2"]);

        let by_description = filter(&data.alerts, &FilterQuery::new().with_search("boat rescue"));
        assert_eq!(ids(&by_description), vec!["3"]);
    }

    #[test]
    fn test_level_filter_keeps_order() {
        let data = dataset();
        let query = FilterQuery::new().with_filter("level", FilterValue::parse("critical"));

        let kept = filter(&data.alerts, &query);
        assert_eq!(ids(&kept), vec!["1", "3"]);
        assert!(kept.iter().all(|a| a.level == Severity::Critical));
    }

    #[test]
    fn test_search_and_category_combine() {
        let data = dataset();
        let query = FilterQuery::new()
            .with_search("flood")
            .with_filter("level", FilterValue::parse("high"));

        let kept = filter(&data.alerts, &query);
        assert_eq!(ids(&kept), vec!["2"]);
    }

    #[test]
    fn test_undeclared_filter_name_matches_nothing() {
        let data = dataset();
        let query = FilterQuery::new().with_filter("colour", FilterValue::parse("red"));
        assert!(filter(&data.alerts, &query).is_empty());
    }

    #[test]
    fn test_undeclared_filter_at_all_is_ignored() {
        let data = dataset();
        let query = FilterQuery::new().with_filter("colour", FilterValue::All);
        assert_eq!(filter(&data.alerts, &query).len(), data.alerts.len());
    }

    #[test]
    fn test_resource_search_includes_address() {
        let data = dataset();
        let kept = filter(&data.resources, &FilterQuery::new().with_search("education blvd"));
        assert_eq!(ids(&kept), vec!["2"]);
    }

    #[test]
    fn test_resource_type_filter() {
        let data = dataset();
        let query = FilterQuery::new().with_filter("type", FilterValue::parse("water"));
        let kept = filter(&data.resources, &query);
        assert_eq!(ids(&kept), vec!["1"]);
    }

    #[test]
    fn test_contact_category_and_optional_fields() {
        let data = dataset();
        let query = FilterQuery::new().with_filter("category", FilterValue::parse("ngo"));
        let kept = filter(&data.contacts, &query);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].category, ContactCategory::Ngo);

        let mut bare = data.contacts[0].clone();
        bare.description = None;
        bare.address = None;
        assert_eq!(bare.search_fields(), vec![bare.name.as_str()]);
    }

    #[test]
    fn test_volunteer_skill_membership_and_search() {
        let data = dataset();

        let query = FilterQuery::new().with_filter("skill", FilterValue::parse("rescue"));
        let kept = filter(&data.volunteers, &query);
        assert_eq!(ids(&kept), vec!["1"]);

        let kept = filter(&data.volunteers, &FilterQuery::new().with_search("cooking"));
        assert_eq!(ids(&kept), vec!["3"]);

        let kept = filter(&data.volunteers, &FilterQuery::new().with_search("pasadena"));
        assert_eq!(ids(&kept), vec!["2"]);
    }

    #[test]
    fn test_verified_filter_parses_bool() {
        let data = dataset();
        let query = FilterQuery::new().with_filter("verified", FilterValue::parse("false"));
        let kept = filter(&data.volunteers, &query);
        assert_eq!(ids(&kept), vec!["3"]);

        let query = FilterQuery::new().with_filter("verified", FilterValue::parse("yes"));
        assert!(filter(&data.volunteers, &query).is_empty());
    }

    #[test]
    fn test_weather_severity_filter() {
        let data = dataset();
        let query = FilterQuery::new().with_filter("severity", FilterValue::parse("medium"));
        let kept = filter(&data.weather_alerts, &query);
        assert_eq!(ids(&kept), vec!["2"]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let data = dataset();
        let kept = filter(&data.alerts, &FilterQuery::new().with_search("volcano"));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_match_ranges_case_insensitive() {
        assert_eq!(match_ranges("Flash Flood", "FLOOD"), vec![6..11]);
        assert_eq!(match_ranges("aaaa", "aa"), vec![0..2, 2..4]);
        assert!(match_ranges("Shelter", "water").is_empty());
    }

    #[test]
    fn test_match_ranges_expanding_lowercase() {
        let text = "İstanbul shelter";
        assert_eq!(match_ranges(text, "i"), vec![0..2]);
        assert_eq!(match_ranges(text, "İST"), vec![0..4]);
        assert!(contains_ignore_case(text, "i"));
    }

    #[test]
    fn test_kept_records_always_have_a_highlight() {
        let mut data = dataset();
        data.resources[0].name = "İstanbul Water Point".to_string();

        for term in ["i", "İ", "water", "ß", "center"] {
            let query = FilterQuery::new().with_search(term);
            for resource in filter(&data.resources, &query) {
                let highlighted = resource
                    .search_fields()
                    .into_iter()
                    .any(|field| !match_ranges(field, term).is_empty());
                assert!(highlighted, "{} kept for {term:?} without a highlight", resource.id);
            }
        }
    }

    #[test]
    fn test_fixture_records_take_declared_values() {
        fn check<T: Filterable>(records: &[T]) {
            for field in T::CATEGORICAL_FIELDS {
                assert!(T::declares(field.name));
                assert!(!field.values.is_empty());
                for record in records {
                    let hits = field
                        .values
                        .iter()
                        .filter(|value| record.field_matches(field.name, value))
                        .count();
                    assert!(hits >= 1, "no declared {} value matches", field.name);
                }
            }
            assert!(!T::declares("colour"));
        }

        let data = dataset();
        check(&data.alerts);
        check(&data.weather_alerts);
        check(&data.resources);
        check(&data.contacts);
        check(&data.volunteers);
    }

    #[test]
    fn test_match_ranges_non_ascii() {
        let text = "Café Étoile";
        let ranges = match_ranges(text, "étoile");
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "Étoile");
    }
}
