//! Time-bounded meteorological warnings.

use super::location::GeoPoint;
use super::tags::{Severity, WeatherType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Area a weather warning applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedArea {
    pub name: String,
    pub center: GeoPoint,
    /// Radius in kilometers.
    #[serde(rename = "radius", default, skip_serializing_if = "Option::is_none")]
    pub radius_km: Option<f64>,
}

/// A meteorological warning over a geographic area.
///
/// `end_time` is optional: a warning without one is ongoing. Nothing checks
/// that `end_time` follows `start_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub weather_type: WeatherType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub affected_area: AffectedArea,
}
