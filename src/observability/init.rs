//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the span log inside the plugin data directory.
pub const SPAN_LOG_FILE: &str = "reliefboard-spans.jsonl";

/// Installs the global subscriber: an `EnvFilter` at `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that appends spans to
/// `~/.local/share/zellij/reliefboard/reliefboard-spans.jsonl`.
///
/// Tracing is best effort. If the data directory cannot be created the
/// plugin runs without it, and calls after the first one are no-ops.
///
/// # Parameters
///
/// * `config` - Plugin configuration; only `trace_level` is read. An
///   unparsable directive falls back to `info`.
///
/// # Example
///
/// ```rust,no_run
/// use reliefboard::observability::init_tracing;
/// use reliefboard::Config;
///
/// let config = Config {
///     trace_level: Some("reliefboard=debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::info!("tracing ready");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "reliefboard"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(SPAN_LOG_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("reliefboard"));

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter).with(otel_layer);

    let _ = subscriber.try_init();
}
