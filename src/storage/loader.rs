//! Bulk dataset load.
//!
//! Issues the five collection reads concurrently and joins them into one
//! [`Dataset`]. The load is all-or-nothing: the first failing read aborts it
//! and becomes the single reported error.

use super::backend::DataSource;
use crate::domain::error::{ReliefError, Result};
use crate::domain::Dataset;
use futures_util::future::try_join5;

/// Loads every collection from `source` and validates the result.
///
/// # Errors
///
/// - [`ReliefError::Fetch`] if any collection read fails. A read that fails
///   with another error kind is reported as a fetch error carrying its
///   message.
/// - [`ReliefError::Data`] if a collection repeats an id.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use futures_executor::block_on;
/// use reliefboard::storage::{load_dataset, FixtureSource};
///
/// let source = FixtureSource::new(Utc::now());
/// let dataset = block_on(load_dataset(&source))?;
/// assert_eq!(dataset.contacts.len(), 5);
/// # Ok::<(), reliefboard::ReliefError>(())
/// ```
pub async fn load_dataset(source: &dyn DataSource) -> Result<Dataset> {
    let (alerts, resources, volunteers, contacts, weather_alerts) = try_join5(
        source.get_alerts(),
        source.get_resources(),
        source.get_volunteers(),
        source.get_contacts(),
        source.get_weather_alerts(),
    )
    .await
    .map_err(into_fetch_error)?;

    let dataset = Dataset {
        alerts,
        resources,
        volunteers,
        contacts,
        weather_alerts,
    };
    dataset.validate()?;

    tracing::debug!(records = dataset.record_count(), "dataset loaded");
    Ok(dataset)
}

fn into_fetch_error(err: ReliefError) -> ReliefError {
    match err {
        ReliefError::Fetch(_) => err,
        other => ReliefError::Fetch(other.to_string()),
    }
}
