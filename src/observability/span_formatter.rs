//! Flat JSON records for finished spans.
//!
//! Each span becomes one self-contained object so the span log can be read
//! line by line with `jq` or any JSON Lines tool:
//!
//! ```json
//! {"service":"reliefboard","traceId":"…","spanId":"…","parentSpanId":"",
//!  "name":"handle_event","startUnixNano":"…","durationMicros":412,
//!  "attributes":{"event_type":"KeyDown"},"events":[],"status":"unset"}
//! ```

use opentelemetry::trace::{Event, SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Map, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Formats spans as JSON objects tagged with the service name.
pub struct SpanFormatter {
    /// Value of the `service` key on every record.
    service: String,
}

impl SpanFormatter {
    /// Creates a formatter that reads `service.name` from `resource`.
    ///
    /// # Parameters
    ///
    /// * `resource` - Tracer resource; `reliefboard` is used when it has no
    ///   service name
    pub fn new(resource: &Resource) -> Self {
        let service = resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map_or_else(|| "reliefboard".to_string(), |value| value.as_str().into_owned());
        Self { service }
    }

    /// Formats a batch of finished spans.
    ///
    /// # Parameters
    ///
    /// * `batch` - Spans from the exporter
    ///
    /// # Returns
    ///
    /// One JSON object per span, in batch order
    pub fn format_batch(&self, batch: &[SpanData]) -> Vec<JsonValue> {
        batch.iter().map(|span| self.format_span(span)).collect()
    }

    /// Flattens one span. Root spans get an empty `parentSpanId`.
    fn format_span(&self, span: &SpanData) -> JsonValue {
        let parent = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or_default()
            .as_micros();

        json!({
            "service": self.service,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "name": span.name,
            "startUnixNano": unix_nanos(span.start_time),
            "durationMicros": u64::try_from(duration).unwrap_or(u64::MAX),
            "attributes": attributes_object(&span.attributes),
            "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
            "status": status_text(&span.status),
        })
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

/// Attributes as a JSON object keyed by attribute name.
fn attributes_object(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

/// Scalars keep their JSON type; arrays are rendered as text.
fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "name": event.name,
        "timeUnixNano": unix_nanos(event.timestamp),
        "attributes": attributes_object(&event.attributes),
    })
}

fn status_text(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("service", &self.service)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_values() {
        let attrs = vec![
            KeyValue::new("records", 16_i64),
            KeyValue::new("list", "Alerts"),
            KeyValue::new("visible", true),
        ];
        assert_eq!(
            attributes_object(&attrs),
            json!({"records": 16, "list": "Alerts", "visible": true})
        );
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(&Status::Unset), "unset");
        assert_eq!(
            status_text(&Status::error("Fetch error: offline")),
            "error: Fetch error: offline"
        );
    }

    #[test]
    fn test_service_name_from_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "relief-test")]);
        assert_eq!(SpanFormatter::new(&resource).service, "relief-test");
        assert_eq!(SpanFormatter::new(&Resource::empty()).service, "reliefboard");
    }
}
