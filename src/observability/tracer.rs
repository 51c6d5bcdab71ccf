//! Tracer provider whose exporter appends span records to a local file.
//!
//! Zellij plugins run sandboxed without network access, so spans are written
//! to the plugin data directory instead of being sent to a collector.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Span exporter writing one JSON line per span.
///
/// Lines go through a [`FileWriter`], so the log rotates by size and the
/// exporter never holds the file open between batches.
struct FileSpanExporter {
    /// Rotating span log.
    writer: FileWriter,
    /// Turns `SpanData` into one JSON object per span.
    formatter: SpanFormatter,
    /// Set by `shutdown`; later exports fail.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates an exporter appending to `file_path`.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Path of the span log
    /// * `resource` - Resource whose attributes are stamped on every record
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Writes each span of `batch` as its own line, stopping at the first
    /// failed write.
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        for record in self.formatter.format_batch(batch) {
            self.writer
                .write_line(&record.to_string())
                .map_err(|e| TraceError::from(e.to_string()))?;
        }
        Ok(())
    }
}

impl SpanExporter for FileSpanExporter {
    /// Exports a batch of finished spans.
    ///
    /// # Parameters
    ///
    /// * `batch` - Spans handed over by the simple span processor
    ///
    /// # Returns
    ///
    /// - `Ok(())` once every span is on disk
    /// - `Err(TraceError)` after shutdown or when a write fails
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// Replaces the resource stamped on subsequent records.
    fn set_resource(&mut self, res: &Resource) {
        self.formatter = SpanFormatter::new(res);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a tracer provider that exports every span as soon as it ends.
///
/// Uses the simple (unbatched) exporter strategy: plugin threads are
/// short-lived between events, so a batching background task would lose
/// spans.
///
/// # Parameters
///
/// * `file_path` - Path of the span log
/// * `resource` - Service metadata attached to the provider and every record
///
/// # Returns
///
/// A provider ready to hand to `tracing-opentelemetry`
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
