//! End-to-end flow: plugin events drive the worker, whose responses drive the
//! dashboard state.

use std::io::Write;

use reliefboard::app::ListKind;
use reliefboard::query::FilterValue;
use reliefboard::ui::viewmodel::EmptyState;
use reliefboard::ui::StyleClass;
use reliefboard::worker::{ReliefWorker, WorkerResponse};
use reliefboard::{handle_event, initialize, Action, AppState, Config, Event, LoadState, Page};
use tempfile::NamedTempFile;

const DATASET: &str = r#"{
  "alerts": [
    {
      "id": "a1",
      "title": "Levee Breach",
      "description": "Evacuate the river district.",
      "level": "critical",
      "disasterType": "flood",
      "timestamp": "2024-10-18T14:00:00Z",
      "location": { "lat": 34.05, "lng": -118.24, "address": "River District" },
      "source": "official"
    },
    {
      "id": "a2",
      "title": "Smoke Plume",
      "description": "Air quality is degrading downwind.",
      "level": "extreme",
      "disasterType": "wildfire",
      "timestamp": "2024-10-18T13:00:00Z",
      "location": { "lat": 34.10, "lng": -118.30 },
      "source": "community"
    }
  ],
  "contacts": [
    { "id": "c1", "name": "County Dispatch", "phone": "555-0111", "category": "police" }
  ]
}"#;

fn write_dataset(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Runs one event through the handler, forwarding worker requests to
/// `worker` and feeding its responses back in.
fn dispatch(state: &mut AppState, worker: &mut ReliefWorker, event: Event) {
    let (_, actions) = handle_event(state, &event).unwrap();
    for action in actions {
        if let Action::PostToWorker(message) = action {
            let response = worker.handle_message(message);
            dispatch(state, worker, Event::WorkerResponse(response));
        }
    }
}

fn state_for(path: &str) -> AppState {
    let config = Config {
        data_file: Some(path.to_string()),
        ..Config::default()
    };
    initialize(&config)
}

#[test]
fn reload_loads_json_dataset() {
    let file = write_dataset(DATASET);
    let mut state = state_for(file.path().to_str().unwrap());
    let mut worker = ReliefWorker::default();

    assert_eq!(state.load_state, LoadState::Loading);
    dispatch(&mut state, &mut worker, Event::Reload);

    let dataset = state.dataset().expect("dataset should be loaded");
    assert_eq!(dataset.alerts.len(), 2);
    assert_eq!(dataset.contacts.len(), 1);
    assert!(dataset.weather_alerts.is_empty());

    let titles: Vec<String> = state.rows().into_iter().map(|row| row.title).collect();
    assert_eq!(titles, vec!["Levee Breach"]);
}

#[test]
fn unknown_level_renders_as_medium() {
    let file = write_dataset(DATASET);
    let mut state = state_for(file.path().to_str().unwrap());
    let mut worker = ReliefWorker::default();
    dispatch(&mut state, &mut worker, Event::Reload);
    dispatch(&mut state, &mut worker, Event::NextPage);
    assert_eq!(state.page, Page::Alerts);

    let rows = state.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].title, "Smoke Plume");
    assert_eq!(rows[1].style, StyleClass::Info);
}

#[test]
fn level_filter_keeps_only_critical_alerts() {
    let file = write_dataset(DATASET);
    let mut state = state_for(file.path().to_str().unwrap());
    let mut worker = ReliefWorker::default();
    dispatch(&mut state, &mut worker, Event::Reload);
    dispatch(&mut state, &mut worker, Event::NextPage);
    dispatch(&mut state, &mut worker, Event::CycleLevel);

    assert_eq!(
        state.query(ListKind::Alerts).filter_value("level"),
        FilterValue::parse("critical")
    );
    assert_eq!(state.row_count(), 1);
}

#[test]
fn missing_file_reports_one_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let mut state = state_for(path.to_str().unwrap());
    let mut worker = ReliefWorker::default();

    dispatch(&mut state, &mut worker, Event::Reload);

    assert!(matches!(state.load_state, LoadState::Failed(_)));
    assert!(state.rows().is_empty());
    let viewmodel = state.compute_viewmodel(30, 100);
    assert!(matches!(viewmodel.empty_state, Some(EmptyState::LoadFailed(_))));
}

#[test]
fn duplicate_ids_fail_the_load() {
    let file = write_dataset(
        r#"{ "contacts": [
            { "id": "c1", "name": "County Dispatch", "phone": "555-0111", "category": "police" },
            { "id": "c1", "name": "City Dispatch", "phone": "555-0112", "category": "police" }
        ] }"#,
    );
    let mut worker = ReliefWorker::default();
    let message = reliefboard::worker::WorkerMessage::load_dataset(Some(
        file.path().to_str().unwrap().to_string(),
    ));

    let response = worker.handle_message(message);
    assert!(matches!(response, WorkerResponse::LoadFailed { .. }));
}

#[test]
fn reload_after_failure_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dataset.json");
    let mut state = state_for(path.to_str().unwrap());
    let mut worker = ReliefWorker::default();

    dispatch(&mut state, &mut worker, Event::Reload);
    assert!(matches!(state.load_state, LoadState::Failed(_)));

    std::fs::write(&path, DATASET).unwrap();
    dispatch(&mut state, &mut worker, Event::Reload);
    assert!(matches!(state.load_state, LoadState::Ready(_)));
}
