//! Immutable snapshot of every collection the dashboard displays.

use super::error::{ReliefError, Result};
use super::{Alert, EmergencyContact, Resource, Volunteer, WeatherAlert};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// All five collections, loaded together.
///
/// A `Dataset` is only ever built from a complete, successful load, so an
/// empty collection inside one means "the source has none", never "not yet
/// loaded".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub volunteers: Vec<Volunteer>,
    #[serde(default)]
    pub contacts: Vec<EmergencyContact>,
    #[serde(default)]
    pub weather_alerts: Vec<WeatherAlert>,
}

impl Dataset {
    /// Checks that ids are unique within each collection.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Data`] naming the collection and the first
    /// repeated id.
    pub fn validate(&self) -> Result<()> {
        ensure_unique_ids("alerts", self.alerts.iter().map(|a| a.id.as_str()))?;
        ensure_unique_ids("resources", self.resources.iter().map(|r| r.id.as_str()))?;
        ensure_unique_ids("volunteers", self.volunteers.iter().map(|v| v.id.as_str()))?;
        ensure_unique_ids("contacts", self.contacts.iter().map(|c| c.id.as_str()))?;
        ensure_unique_ids(
            "weather alerts",
            self.weather_alerts.iter().map(|w| w.id.as_str()),
        )
    }

    /// Total number of records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.alerts.len()
            + self.resources.len()
            + self.volunteers.len()
            + self.contacts.len()
            + self.weather_alerts.len()
    }
}

fn ensure_unique_ids<'a>(collection: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ReliefError::Data(format!(
                "duplicate id {id:?} in {collection}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactCategory, EmergencyContact};

    fn contact(id: &str) -> EmergencyContact {
        EmergencyContact {
            id: id.to_string(),
            name: "Fire & Rescue".to_string(),
            description: None,
            phone: "911".to_string(),
            address: None,
            website: None,
            category: ContactCategory::Fire,
        }
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        assert!(Dataset::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let dataset = Dataset {
            contacts: vec![contact("1"), contact("2"), contact("1")],
            ..Dataset::default()
        };

        let err = dataset.validate().unwrap_err();
        assert!(matches!(err, ReliefError::Data(_)));
        assert!(err.to_string().contains("contacts"));
    }

    #[test]
    fn test_same_id_in_different_collections_is_allowed() {
        let mut dataset = crate::storage::fixtures::dataset(chrono::Utc::now());
        dataset.contacts = vec![contact("1")];
        assert!(dataset.alerts.iter().any(|a| a.id == "1"));
        assert!(dataset.validate().is_ok());
    }
}
