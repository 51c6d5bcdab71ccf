//! JSON file data source.
//!
//! Reads a dataset file with the same shape as [`Dataset`]: one object with
//! `alerts`, `resources`, `volunteers`, `contacts` and `weatherAlerts` arrays.
//! Missing arrays are treated as empty. The file is read again on every
//! collection read, so edits show up on the next reload without restarting
//! the plugin.
//!
//! # File Format
//!
//! ```json
//! {
//!   "alerts": [
//!     {
//!       "id": "1",
//!       "title": "Flash Flood Warning",
//!       "description": "Seek higher ground immediately.",
//!       "level": "critical",
//!       "disasterType": "flood",
//!       "timestamp": "2024-10-18T14:34:00Z",
//!       "location": { "lat": 34.05, "lng": -118.24, "address": "Los Angeles, CA" },
//!       "source": "official"
//!     }
//!   ],
//!   "weatherAlerts": []
//! }
//! ```

use super::backend::SnapshotSource;
use crate::domain::error::{ReliefError, Result};
use crate::domain::Dataset;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// [`DataSource`](super::DataSource) backed by a JSON dataset file.
///
/// # Thread Safety
///
/// Holds only the path, so it is `Send + Sync`; every read opens the file
/// independently.
#[derive(Debug, Clone)]
pub struct JsonSource {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonSource {
    /// Creates a source for `file_path`. The file is not touched until the
    /// first read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use futures_executor::block_on;
    /// use reliefboard::storage::{DataSource, JsonSource};
    ///
    /// let source = JsonSource::new("/data/dataset.json");
    /// let contacts = block_on(source.get_contacts())?;
    /// # Ok::<(), reliefboard::ReliefError>(())
    /// ```
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads the dataset from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Fetch`] if the file cannot be read or contains
    /// invalid JSON.
    fn load_from_file(&self) -> Result<Dataset> {
        let contents = std::fs::read_to_string(&self.file_path).map_err(|e| {
            ReliefError::Fetch(format!("failed to read {}: {e}", self.file_path.display()))
        })?;

        let data: Dataset = serde_json::from_str(&contents).map_err(|e| {
            ReliefError::Fetch(format!(
                "failed to parse {}: {e}",
                self.file_path.display()
            ))
        })?;

        tracing::debug!(
            path = ?self.file_path,
            records = data.record_count(),
            "loaded dataset file"
        );

        Ok(data)
    }
}

impl SnapshotSource for JsonSource {
    fn name(&self) -> &'static str {
        "json"
    }

    fn snapshot(&self) -> Result<Cow<'_, Dataset>> {
        self.load_from_file().map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{fixtures, DataSource};
    use chrono::{TimeZone, Utc};
    use futures_executor::block_on;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_serialized_dataset() {
        let now = Utc.with_ymd_and_hms(2024, 10, 18, 12, 0, 0).unwrap();
        let expected = fixtures::dataset(now);
        let file = write_temp(&serde_json::to_string(&expected).unwrap());

        let source = JsonSource::new(file.path());
        assert_eq!(source.path(), file.path());
        assert_eq!(block_on(source.get_alerts()).unwrap(), expected.alerts);
        assert_eq!(block_on(source.get_volunteers()).unwrap(), expected.volunteers);
        assert_eq!(
            block_on(source.get_weather_alerts()).unwrap(),
            expected.weather_alerts
        );
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let file = write_temp(r#"{ "contacts": [] }"#);
        let source = JsonSource::new(file.path());
        assert!(block_on(source.get_alerts()).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_tag_values_load() {
        let file = write_temp(
            r#"{ "contacts": [
                { "id": "9", "name": "Harbor Patrol", "phone": "555-0100", "category": "coastguard" }
            ] }"#,
        );
        let source = JsonSource::new(file.path());
        let contacts = block_on(source.get_contacts()).unwrap();
        assert_eq!(contacts[0].category.as_str(), "coastguard");
        assert!(!contacts[0].category.is_known());
    }

    #[test]
    fn test_missing_file_is_fetch_error() {
        let source = JsonSource::new("/nonexistent/reliefboard/dataset.json");
        let err = block_on(source.get_resources()).unwrap_err();
        assert!(matches!(err, ReliefError::Fetch(_)));
    }

    #[test]
    fn test_invalid_json_is_fetch_error() {
        let file = write_temp("{ not json");
        let source = JsonSource::new(file.path());
        let err = block_on(source.get_contacts()).unwrap_err();
        assert!(matches!(err, ReliefError::Fetch(_)));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_lookup_not_found() {
        let file = write_temp(r#"{}"#);
        let source = JsonSource::new(file.path());
        let err = block_on(source.get_alert("42")).unwrap_err();
        assert!(matches!(err, ReliefError::NotFound { kind: "alert", .. }));
    }
}
