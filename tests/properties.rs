//! Behavioral properties of the pure helpers: filtering, time formatting,
//! severity presentation and map layers.

use chrono::{Duration, TimeZone, Utc};

use reliefboard::domain::time::{format_elapsed, format_remaining};
use reliefboard::domain::{Alert, Severity};
use reliefboard::query::filter::ALL;
use reliefboard::query::{
    filter, map_items, visible, CategoricalField, FilterQuery, FilterValue, Filterable, Layer,
    LayerSet,
};
use reliefboard::storage::fixtures;
use reliefboard::ui::presentation::{classify_severity, severity_label, IconKind};
use reliefboard::ui::StyleClass;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 18, 15, 4, 0).unwrap()
}

fn ids(alerts: &[&Alert]) -> Vec<String> {
    alerts.iter().map(|alert| alert.id.clone()).collect()
}

const SEARCH_TERMS: [&str; 6] = ["", "f", "water", "MEDICAL", "shelter", "zzz"];

/// Every combination of `all` and each declared value over `fields`.
fn category_grid(fields: &[CategoricalField]) -> Vec<Vec<(&'static str, FilterValue)>> {
    fields.iter().fold(vec![Vec::new()], |grid, field| {
        let mut next = Vec::new();
        for prefix in &grid {
            for value in std::iter::once(ALL).chain(field.values.iter().copied()) {
                let mut combo = prefix.clone();
                combo.push((field.name, FilterValue::parse(value)));
                next.push(combo);
            }
        }
        next
    })
}

/// Straightforward restatement of the filter predicate.
fn expected_matches<'a, T: Filterable>(
    records: &'a [T],
    term: &str,
    filters: &[(&str, FilterValue)],
) -> Vec<&'a T> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            let searched = term.is_empty()
                || record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle));
            let categorized = filters.iter().all(|(name, value)| {
                value
                    .as_only()
                    .map_or(true, |expected| record.field_matches(name, expected))
            });
            searched && categorized
        })
        .collect()
}

/// Checks every query of the grid against `records` and returns how many
/// queries kept at least one record.
fn check_query_grid<T: Filterable>(records: &[T]) -> usize {
    let mut non_empty = 0;
    for filters in category_grid(T::CATEGORICAL_FIELDS) {
        for term in SEARCH_TERMS {
            let mut query = FilterQuery::new().with_search(term);
            for (name, value) in &filters {
                query.set_filter(*name, value.clone());
            }

            let result = filter(records, &query);
            let positions: Vec<usize> = result
                .iter()
                .map(|hit| {
                    records
                        .iter()
                        .position(|record| std::ptr::eq(record, *hit))
                        .expect("result borrows from the input")
                })
                .collect();
            assert!(
                positions.windows(2).all(|pair| pair[0] < pair[1]),
                "order broken for {query:?}"
            );

            let expected = expected_matches(records, term, &filters);
            assert_eq!(result.len(), expected.len(), "count differs for {query:?}");
            assert!(result
                .iter()
                .zip(&expected)
                .all(|(got, want)| std::ptr::eq(*got, *want)));

            if !result.is_empty() {
                non_empty += 1;
            }
        }
    }
    non_empty
}

#[test]
fn filter_is_ordered_subsequence_for_every_query() {
    let data = fixtures::dataset(now());
    assert!(check_query_grid(&data.alerts) > 0);
    assert!(check_query_grid(&data.weather_alerts) > 0);
    assert!(check_query_grid(&data.contacts) > 0);
    assert!(check_query_grid(&data.resources) > 0);
    assert!(check_query_grid(&data.volunteers) > 0);
}

#[test]
fn filter_result_is_ordered_subsequence() {
    let data = fixtures::dataset(now());
    let query = FilterQuery::new()
        .with_search("f")
        .with_filter("level", FilterValue::parse("critical"));

    let result = filter(&data.alerts, &query);
    assert!(!result.is_empty());

    let mut positions = result
        .iter()
        .map(|hit| data.alerts.iter().position(|alert| alert.id == hit.id).unwrap());
    let mut last = positions.next().unwrap();
    for pos in positions {
        assert!(pos > last);
        last = pos;
    }
    assert!(result.iter().all(|alert| alert.level == Severity::Critical));
}

#[test]
fn identity_query_returns_input() {
    let data = fixtures::dataset(now());
    let query = FilterQuery::new().with_filter("level", FilterValue::All);
    assert!(query.is_identity());

    let result = filter(&data.alerts, &query);
    let expected: Vec<&Alert> = data.alerts.iter().collect();
    assert_eq!(ids(&result), ids(&expected));
}

#[test]
fn critical_filter_over_mixed_levels() {
    let data = fixtures::dataset(now());
    let critical = data.alerts[0].clone();
    let high = data
        .alerts
        .iter()
        .find(|alert| alert.level == Severity::High)
        .unwrap()
        .clone();
    let alerts = vec![critical.clone(), high];

    let query = FilterQuery::new().with_filter("level", FilterValue::parse("critical"));
    let result = filter(&alerts, &query);
    assert_eq!(result, vec![&critical]);
}

#[test]
fn undeclared_filter_matches_nothing() {
    let data = fixtures::dataset(now());
    let query = FilterQuery::new().with_filter("skill", FilterValue::parse("medical"));
    assert!(filter(&data.alerts, &query).is_empty());
}

#[test]
fn elapsed_boundaries() {
    let now = now();
    assert_eq!(format_elapsed(now, now), "Just now");
    assert_eq!(format_elapsed(now - Duration::seconds(59), now), "Just now");
    assert_eq!(format_elapsed(now - Duration::seconds(90), now), "1 minutes ago");
    assert_eq!(format_elapsed(now - Duration::hours(3), now), "3 hours ago");
    assert_eq!(format_elapsed(now - Duration::hours(50), now), "2 days ago");
    assert_eq!(format_elapsed(now + Duration::hours(1), now), "Just now");
}

#[test]
fn remaining_boundaries() {
    let now = now();
    assert_eq!(
        format_remaining(Some(now + Duration::minutes(30)), now),
        "30 min remaining"
    );
    assert_eq!(format_remaining(Some(now - Duration::minutes(1)), now), "Ended");
    assert_eq!(format_remaining(None, now), "Ongoing");
}

#[test]
fn classifier_is_total_and_unknown_reads_as_medium() {
    let unknown: Severity = "extreme".parse().unwrap_or_else(|never| match never {});
    let medium = classify_severity(&Severity::Medium);

    assert_eq!(classify_severity(&unknown), medium);
    assert_eq!(medium.icon, IconKind::Info);
    assert_eq!(medium.style, StyleClass::Info);
    assert_eq!(severity_label(&unknown), "Unknown");

    let styles: Vec<StyleClass> = [Severity::Critical, Severity::High, Severity::Low]
        .iter()
        .map(|level| classify_severity(level).style)
        .collect();
    assert_eq!(
        styles,
        vec![StyleClass::Emergency, StyleClass::Warning, StyleClass::Success]
    );
}

#[test]
fn double_toggle_is_identity() {
    for layer in Layer::ALL {
        let mut layers = LayerSet::default();
        layers.toggle(layer);
        layers.toggle(layer);
        assert_eq!(layers, LayerSet::default());
    }
}

#[test]
fn volunteer_layer_shows_located_volunteers() {
    let data = fixtures::dataset(now());
    let items = map_items(&data);

    let mut layers = LayerSet::default();
    let before = visible(&items, &layers).len();
    layers.toggle(Layer::Volunteers);
    let after = visible(&items, &layers).len();

    assert_eq!(after - before, data.volunteers.len());
}
