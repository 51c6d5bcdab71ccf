//! Worker thread implementation for data source operations.
//!
//! This module implements the Zellij worker thread interface. The worker owns
//! the active [`DataSource`], runs the concurrent bulk load to completion and
//! answers writes with the source's echo. All of it happens off the plugin
//! thread so rendering never waits on file I/O.

use crate::domain::error::{ReliefError, Result};
use crate::infrastructure::paths;
use crate::storage::{load_dataset, DataSource, FixtureSource, JsonSource};
use crate::worker::{WorkerMessage, WorkerResponse};
use futures_executor::block_on;
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Runs on a separate thread spawned by Zellij. The data source is chosen by
/// each `LoadDataset` message and kept for the writes that follow it.
#[derive(Serialize, Deserialize, Default)]
pub struct ReliefWorker {
    /// Source selected by the most recent load.
    #[serde(skip)]
    source: Option<Box<dyn DataSource>>,
}

impl ReliefWorker {
    /// Builds the source for a load request: the JSON file when one is
    /// configured, otherwise the built-in sample data stamped with the
    /// current time.
    fn open_source(data_file: Option<&str>) -> Box<dyn DataSource> {
        match data_file {
            Some(file) => {
                let source = JsonSource::new(paths::resolve_data_file(file));
                tracing::debug!(path = %source.path().display(), "using json data source");
                Box::new(source)
            }
            None => {
                tracing::debug!("using built-in sample data");
                Box::new(FixtureSource::new(chrono::Utc::now()))
            }
        }
    }

    /// Returns the active source, failing if no load has selected one yet.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Worker`] before the first `LoadDataset`.
    fn get_source(&self) -> Result<&dyn DataSource> {
        self.source
            .as_deref()
            .ok_or_else(|| ReliefError::Worker("no data source loaded".to_string()))
    }

    /// Maps a source result to a response with consistent logging.
    fn handle_source_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "source operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "source operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_dataset(&mut self, data_file: Option<&str>) -> WorkerResponse {
        let source = self.source.insert(Self::open_source(data_file));

        match block_on(load_dataset(source.as_ref())) {
            Ok(dataset) => {
                tracing::info!(records = dataset.record_count(), "dataset loaded");
                WorkerResponse::DatasetLoaded { dataset }
            }
            Err(e) => {
                tracing::warn!(error = %e, "dataset load failed");
                WorkerResponse::LoadFailed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Processes a worker message and returns the response.
    ///
    /// Attaches the message's trace context and opens a span for the
    /// operation before dispatching.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadDataset { data_file, .. } => {
                self.handle_load_dataset(data_file.as_deref())
            }
            WorkerMessage::CreateAlert { alert, .. } => Self::handle_source_result(
                "create alert",
                self.get_source().and_then(|source| block_on(source.create_alert(alert))),
                |alert| WorkerResponse::AlertSaved { alert },
            ),
            WorkerMessage::UpdateAlert { id, alert, .. } => Self::handle_source_result(
                "update alert",
                self.get_source()
                    .and_then(|source| block_on(source.update_alert(id, alert))),
                |alert| WorkerResponse::AlertSaved { alert },
            ),
            WorkerMessage::DeleteAlert { id, .. } => Self::handle_source_result(
                "delete alert",
                self.get_source()
                    .and_then(|source| block_on(source.delete_alert(id.clone()))),
                |()| WorkerResponse::Deleted {
                    kind: "alert".to_string(),
                    id,
                },
            ),
            WorkerMessage::CreateResource { resource, .. } => Self::handle_source_result(
                "create resource",
                self.get_source()
                    .and_then(|source| block_on(source.create_resource(resource))),
                |resource| WorkerResponse::ResourceSaved { resource },
            ),
            WorkerMessage::UpdateResource { id, resource, .. } => Self::handle_source_result(
                "update resource",
                self.get_source()
                    .and_then(|source| block_on(source.update_resource(id, resource))),
                |resource| WorkerResponse::ResourceSaved { resource },
            ),
            WorkerMessage::DeleteResource { id, .. } => Self::handle_source_result(
                "delete resource",
                self.get_source()
                    .and_then(|source| block_on(source.delete_resource(id.clone()))),
                |()| WorkerResponse::Deleted {
                    kind: "resource".to_string(),
                    id,
                },
            ),
            WorkerMessage::RegisterVolunteer { registration, .. } => Self::handle_source_result(
                "register volunteer",
                self.get_source()
                    .and_then(|source| block_on(source.register_volunteer(registration))),
                |volunteer| WorkerResponse::VolunteerRegistered { volunteer },
            ),
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the
    /// operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }
}

/// Initializes tracing for the worker thread with the default configuration.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for ReliefWorker {
    /// Handles a message from the plugin thread.
    ///
    /// Deserializes the `WorkerMessage` payload, processes it and posts the
    /// serialized `WorkerResponse` back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                post_message_to_plugin(PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker response");
            }
        }
    }
}
