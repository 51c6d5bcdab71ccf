//! Error types for reliefboard.
//!
//! This module defines the centralized error type [`ReliefError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! Unrecognized tag values (severity, category, type) are deliberately absent
//! from this enum: they are data, not failures, and resolve to a default
//! presentation instead.

use thiserror::Error;

/// The main error type for reliefboard operations.
///
/// # Examples
///
/// ```
/// use reliefboard::ReliefError;
///
/// fn fetch() -> Result<(), ReliefError> {
///     Err(ReliefError::Fetch("alerts: connection refused".to_string()))
/// }
///
/// assert!(fetch().unwrap_err().to_string().starts_with("Fetch error"));
/// ```
#[derive(Debug, Error)]
pub enum ReliefError {
    /// A collection read from the data source failed.
    ///
    /// A failed bulk load surfaces as exactly one of these, whichever of the
    /// parallel reads failed first.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The data source returned records that violate a dataset invariant,
    /// such as two records sharing an id within one collection.
    #[error("Data error: {0}")]
    Data(String),

    /// A lookup by id found nothing.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind, e.g. `"alert"`.
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for reliefboard operations.
pub type Result<T> = std::result::Result<T, ReliefError>;
