//! Data source abstraction.
//!
//! This module defines the [`DataSource`] trait that abstracts over where the
//! dashboard's records come from. Every operation returns a boxed future so
//! the trait stays object safe and the loader can run the collection reads
//! concurrently.
//!
//! # Write semantics
//!
//! Writes are echo-only: the source answers with the record it would have
//! stored (with a generated id where one is assigned) but later reads never
//! reflect the change.

use crate::domain::error::{ReliefError, Result};
use crate::domain::{
    Alert, Dataset, EmergencyContact, Resource, Volunteer, VolunteerRegistration, WeatherAlert,
};
use futures_util::future::BoxFuture;
use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::Instrument;

/// Abstraction over record sources.
///
/// # Implementations
///
/// - [`FixtureSource`](super::FixtureSource): the built-in sample dataset
/// - [`JsonSource`](super::JsonSource): a dataset file on disk
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use futures_executor::block_on;
/// use reliefboard::storage::{DataSource, FixtureSource};
///
/// let source = FixtureSource::new(Utc::now());
/// let alerts = block_on(source.get_alerts())?;
/// assert_eq!(alerts.len(), 3);
/// # Ok::<(), reliefboard::ReliefError>(())
/// ```
pub trait DataSource: Send + Sync {
    /// Every alert, in source order.
    fn get_alerts(&self) -> BoxFuture<'_, Result<Vec<Alert>>>;

    /// Every resource, in source order.
    fn get_resources(&self) -> BoxFuture<'_, Result<Vec<Resource>>>;

    /// Every registered volunteer, in source order.
    fn get_volunteers(&self) -> BoxFuture<'_, Result<Vec<Volunteer>>>;

    /// Every emergency contact, in source order.
    fn get_contacts(&self) -> BoxFuture<'_, Result<Vec<EmergencyContact>>>;

    /// Every weather warning, in source order.
    fn get_weather_alerts(&self) -> BoxFuture<'_, Result<Vec<WeatherAlert>>>;

    /// Looks up one alert.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::NotFound`](crate::ReliefError::NotFound) when no
    /// alert has `id`, or the read error of the underlying collection.
    fn get_alert<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Alert>>;

    /// Looks up one resource.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::NotFound`](crate::ReliefError::NotFound) when no
    /// resource has `id`, or the read error of the underlying collection.
    fn get_resource<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Resource>>;

    /// Echoes `alert` back with a freshly generated id.
    fn create_alert(&self, alert: Alert) -> BoxFuture<'_, Result<Alert>>;

    /// Echoes `alert` back carrying `id`.
    fn update_alert(&self, id: String, alert: Alert) -> BoxFuture<'_, Result<Alert>>;

    fn delete_alert(&self, id: String) -> BoxFuture<'_, Result<()>>;

    /// Echoes `resource` back with a freshly generated id.
    fn create_resource(&self, resource: Resource) -> BoxFuture<'_, Result<Resource>>;

    /// Echoes `resource` back carrying `id`.
    fn update_resource(&self, id: String, resource: Resource) -> BoxFuture<'_, Result<Resource>>;

    fn delete_resource(&self, id: String) -> BoxFuture<'_, Result<()>>;

    /// Completes a registration with a generated id. The new volunteer is
    /// always unverified.
    fn register_volunteer(
        &self,
        registration: VolunteerRegistration,
    ) -> BoxFuture<'_, Result<Volunteer>>;
}

/// A source that can produce a whole [`Dataset`] synchronously.
///
/// Implementing this is enough to get a [`DataSource`]: every collection read
/// takes a fresh snapshot and every write is echoed.
pub trait SnapshotSource: Send + Sync {
    /// Name used in spans and fetch error messages.
    fn name(&self) -> &'static str;

    /// Reads the current dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Fetch`] when the dataset cannot be produced.
    fn snapshot(&self) -> Result<Cow<'_, Dataset>>;
}

impl<S: SnapshotSource> DataSource for S {
    fn get_alerts(&self) -> BoxFuture<'_, Result<Vec<Alert>>> {
        let span = tracing::debug_span!("source_get_alerts", source = self.name());
        Box::pin(async move { Ok(self.snapshot()?.alerts.clone()) }.instrument(span))
    }

    fn get_resources(&self) -> BoxFuture<'_, Result<Vec<Resource>>> {
        let span = tracing::debug_span!("source_get_resources", source = self.name());
        Box::pin(async move { Ok(self.snapshot()?.resources.clone()) }.instrument(span))
    }

    fn get_volunteers(&self) -> BoxFuture<'_, Result<Vec<Volunteer>>> {
        let span = tracing::debug_span!("source_get_volunteers", source = self.name());
        Box::pin(async move { Ok(self.snapshot()?.volunteers.clone()) }.instrument(span))
    }

    fn get_contacts(&self) -> BoxFuture<'_, Result<Vec<EmergencyContact>>> {
        let span = tracing::debug_span!("source_get_contacts", source = self.name());
        Box::pin(async move { Ok(self.snapshot()?.contacts.clone()) }.instrument(span))
    }

    fn get_weather_alerts(&self) -> BoxFuture<'_, Result<Vec<WeatherAlert>>> {
        let span = tracing::debug_span!("source_get_weather_alerts", source = self.name());
        Box::pin(async move { Ok(self.snapshot()?.weather_alerts.clone()) }.instrument(span))
    }

    fn get_alert<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Alert>> {
        let span = tracing::debug_span!("source_get_alert", source = self.name(), id = %id);
        Box::pin(
            async move {
                self.snapshot()?
                    .alerts
                    .iter()
                    .find(|alert| alert.id == id)
                    .cloned()
                    .ok_or_else(|| ReliefError::NotFound {
                        kind: "alert",
                        id: id.to_string(),
                    })
            }
            .instrument(span),
        )
    }

    fn get_resource<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Resource>> {
        let span = tracing::debug_span!("source_get_resource", source = self.name(), id = %id);
        Box::pin(
            async move {
                self.snapshot()?
                    .resources
                    .iter()
                    .find(|resource| resource.id == id)
                    .cloned()
                    .ok_or_else(|| ReliefError::NotFound {
                        kind: "resource",
                        id: id.to_string(),
                    })
            }
            .instrument(span),
        )
    }

    fn create_alert(&self, alert: Alert) -> BoxFuture<'_, Result<Alert>> {
        let id = generate_id();
        tracing::debug!(source = self.name(), id = %id, "echoing created alert");
        Box::pin(std::future::ready(Ok(Alert { id, ..alert })))
    }

    fn update_alert(&self, id: String, alert: Alert) -> BoxFuture<'_, Result<Alert>> {
        tracing::debug!(source = self.name(), id = %id, "echoing updated alert");
        Box::pin(std::future::ready(Ok(Alert { id, ..alert })))
    }

    fn delete_alert(&self, id: String) -> BoxFuture<'_, Result<()>> {
        tracing::debug!(source = self.name(), id = %id, "ignoring alert delete");
        Box::pin(std::future::ready(Ok(())))
    }

    fn create_resource(&self, resource: Resource) -> BoxFuture<'_, Result<Resource>> {
        let id = generate_id();
        tracing::debug!(source = self.name(), id = %id, "echoing created resource");
        Box::pin(std::future::ready(Ok(Resource { id, ..resource })))
    }

    fn update_resource(&self, id: String, resource: Resource) -> BoxFuture<'_, Result<Resource>> {
        tracing::debug!(source = self.name(), id = %id, "echoing updated resource");
        Box::pin(std::future::ready(Ok(Resource { id, ..resource })))
    }

    fn delete_resource(&self, id: String) -> BoxFuture<'_, Result<()>> {
        tracing::debug!(source = self.name(), id = %id, "ignoring resource delete");
        Box::pin(std::future::ready(Ok(())))
    }

    fn register_volunteer(
        &self,
        registration: VolunteerRegistration,
    ) -> BoxFuture<'_, Result<Volunteer>> {
        let id = generate_id();
        tracing::debug!(source = self.name(), id = %id, "echoing volunteer registration");
        Box::pin(std::future::ready(Ok(registration.into_volunteer(id))))
    }
}

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generates a short record id for an echoed write.
///
/// Ids are the base-36 creation time in milliseconds followed by a base-36
/// process-wide sequence number, so no two calls in one process collide.
pub fn generate_id() -> String {
    let sequence = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
    format!("{}{}", to_base36(millis), to_base36(sequence))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_ids_are_unique() {
        let generated: HashSet<String> = (0..500).map(|_| generate_id()).collect();
        assert_eq!(generated.len(), 500);
    }
}
