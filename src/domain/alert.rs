//! Emergency alert records.

use super::location::Location;
use super::tags::{AlertSource, DisasterType, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An emergency event report with a severity level and disaster type.
///
/// Alerts are created by the data source when the dataset loads. The client
/// never mutates one; an update from the source replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: Severity,
    pub disaster_type: DisasterType,
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    pub source: AlertSource,
}

impl Alert {
    /// Returns `true` for alerts at the `critical` level, the ones the
    /// overview page leads with.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.level == Severity::Critical
    }
}
