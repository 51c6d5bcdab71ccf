//! Relief resource records: located supplies and services.

use super::location::SiteLocation;
use super::tags::ResourceType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A located, categorized supply or service offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub location: SiteLocation,
    pub contact_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub verified: bool,
}

impl Resource {
    /// Contact phone for display, with the placeholder the resource cards use
    /// when none was provided.
    #[must_use]
    pub fn phone_or_placeholder(&self) -> &str {
        self.contact_phone.as_deref().unwrap_or("No phone provided")
    }
}
