//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the plugin
//! thread and the background worker that talks to the data source. It also
//! carries distributed tracing context across the thread boundary.

use crate::domain::{Alert, Dataset, Resource, Volunteer, VolunteerRegistration};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so worker spans
/// are recorded as children of the plugin span that posted the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid, which is the
    /// case when tracing has not been initialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use reliefboard::worker::TraceContext;
    ///
    /// if let Some(ctx) = TraceContext::from_current() {
    ///     println!("Trace ID: {}", ctx.trace_id);
    /// }
    /// ```
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id_str = format!("{:032x}", span_context.trace_id());
            let parent_span_id_str = format!("{:016x}", span_context.span_id());

            tracing::trace!(
                trace_id = %trace_id_str,
                parent_span_id = %parent_span_id_str,
                "capturing trace context"
            );

            Some(Self {
                trace_id: trace_id_str,
                parent_span_id: parent_span_id_str,
            })
        } else {
            None
        }
    }
}

/// Generates builder methods for `WorkerMessage` variants that attach the
/// current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_dataset(LoadDataset { data_file: Option<String> }),
    create_alert(CreateAlert { alert: Alert }),
    update_alert(UpdateAlert { id: String, alert: Alert }),
    delete_alert(DeleteAlert { id: String }),
    create_resource(CreateResource { resource: Resource }),
    update_resource(UpdateResource { id: String, resource: Resource }),
    delete_resource(DeleteResource { id: String }),
    register_volunteer(RegisterVolunteer { registration: VolunteerRegistration }),
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load every collection from the configured source.
    LoadDataset {
        /// JSON dataset file; `None` selects the built-in sample data.
        data_file: Option<String>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Creates an alert. This and the other write messages are posted by
    /// embedding callers; the dashboard's key bindings never send them.
    CreateAlert {
        alert: Alert,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    UpdateAlert {
        id: String,
        alert: Alert,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    DeleteAlert {
        id: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    CreateResource {
        resource: Resource,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    UpdateResource {
        id: String,
        resource: Resource,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    DeleteResource {
        id: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    RegisterVolunteer {
        registration: VolunteerRegistration,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context attached when the message was built.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadDataset { trace_context, .. }
            | Self::CreateAlert { trace_context, .. }
            | Self::UpdateAlert { trace_context, .. }
            | Self::DeleteAlert { trace_context, .. }
            | Self::CreateResource { trace_context, .. }
            | Self::UpdateResource { trace_context, .. }
            | Self::DeleteResource { trace_context, .. }
            | Self::RegisterVolunteer { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// Every collection loaded and validated.
    DatasetLoaded {
        dataset: Dataset,
    },

    /// The bulk load failed. No partial data accompanies it.
    LoadFailed {
        message: String,
    },

    /// An alert write was accepted; carries the echoed record.
    AlertSaved {
        alert: Alert,
    },

    /// A resource write was accepted; carries the echoed record.
    ResourceSaved {
        resource: Resource,
    },

    /// A delete was accepted.
    Deleted {
        /// Record kind, `alert` or `resource`.
        kind: String,
        id: String,
    },

    VolunteerRegistered {
        volunteer: Volunteer,
    },

    /// A write failed.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures;
    use chrono::Utc;

    #[test]
    fn test_untraced_message_omits_context() {
        let message = WorkerMessage::load_dataset(Some("dataset.json".to_string()));
        assert!(message.trace_context().is_none());

        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"LoadDataset":{"data_file":"dataset.json"}}"#);
        assert_eq!(serde_json::from_str::<WorkerMessage>(&json).unwrap(), message);
    }

    #[test]
    fn test_traced_message_carries_context() {
        let json = r#"{"DeleteAlert":{"id":"1","trace_context":{"trace_id":"4bf92f3577b34da6a3ce929d0e0e4736","parent_span_id":"00f067aa0ba902b7"}}}"#;
        let message: WorkerMessage = serde_json::from_str(json).unwrap();
        let context = message.trace_context().unwrap();
        assert_eq!(context.parent_span_id, "00f067aa0ba902b7");
    }

    #[test]
    fn test_dataset_response_survives_ipc() {
        let response = WorkerResponse::DatasetLoaded {
            dataset: fixtures::dataset(Utc::now()),
        };
        let payload = serde_json::to_string(&response).unwrap();
        assert_eq!(
            serde_json::from_str::<WorkerResponse>(&payload).unwrap(),
            response
        );
    }
}
