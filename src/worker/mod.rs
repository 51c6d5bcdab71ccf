//! Background worker thread for data source access.
//!
//! The plugin thread never touches the data source directly: it posts a
//! [`WorkerMessage`] and receives a [`WorkerResponse`] once the worker has
//! run the bulk load or echoed a write. Messages carry tracing context so the
//! worker's spans join the plugin's trace.
//!
//! The plugin's own events only ever post `LoadDataset`. The write messages
//! are there for embedding callers that post them to the same worker; see the
//! crate docs.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::ReliefWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
