//! Registered volunteers and their availability.

use super::location::Location;
use super::tags::VolunteerSkill;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// When a volunteer can help. An absent `end_date` means open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub all_day: bool,
}

/// A person registered to help with relief work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub skills: BTreeSet<VolunteerSkill>,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub verified: bool,
}

impl Volunteer {
    /// Comma-separated, capitalized skill labels, e.g. `"Medical, Rescue"`.
    #[must_use]
    pub fn skill_summary(&self) -> String {
        self.skills
            .iter()
            .map(VolunteerSkill::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Registration payload: a volunteer before the source assigns an id and
/// verification status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerRegistration {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub skills: BTreeSet<VolunteerSkill>,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl VolunteerRegistration {
    /// Completes the registration with an assigned id. New volunteers are
    /// always unverified.
    #[must_use]
    pub fn into_volunteer(self, id: String) -> Volunteer {
        Volunteer {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            skills: self.skills,
            availability: self.availability,
            location: self.location,
            verified: false,
        }
    }
}
