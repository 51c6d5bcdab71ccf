//! OpenTelemetry tracing with a local JSON Lines span log.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer → FileSpanExporter → reliefboard-spans.jsonl
//! ```
//!
//! The log rotates by size and keeps a few backups. The verbosity comes from
//! the `trace_level` plugin option (default `info`), parsed as an
//! `EnvFilter` directive such as `reliefboard=debug`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: Span to JSON conversion
//! - [`file_writer`]: Rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SPAN_LOG_FILE};
