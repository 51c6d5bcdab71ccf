//! Built-in sample dataset.
//!
//! Three alerts, three resources, five emergency contacts, two weather
//! warnings and three volunteers around Los Angeles. Timestamps are relative
//! to an injected `now`, so the dataset always looks fresh and tests can pin
//! the clock.

use super::backend::SnapshotSource;
use crate::domain::error::Result;
use crate::domain::{
    AffectedArea, Alert, AlertSource, Availability, ContactCategory, Dataset, DisasterType,
    EmergencyContact, GeoPoint, Location, Resource, ResourceType, Severity, SiteLocation,
    Volunteer, VolunteerSkill, WeatherAlert, WeatherType,
};
use chrono::{DateTime, Duration, Utc};
use std::borrow::Cow;

const DOWNTOWN: GeoPoint = GeoPoint::new(34.052_235, -118.243_683);

/// [`DataSource`](super::DataSource) serving the built-in sample dataset.
///
/// The dataset is built once, relative to the `now` given at construction.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    dataset: Dataset,
}

impl FixtureSource {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            dataset: dataset(now),
        }
    }
}

impl SnapshotSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixtures"
    }

    fn snapshot(&self) -> Result<Cow<'_, Dataset>> {
        Ok(Cow::Borrowed(&self.dataset))
    }
}

/// Builds the sample dataset with timestamps relative to `now`.
#[must_use]
pub fn dataset(now: DateTime<Utc>) -> Dataset {
    Dataset {
        alerts: alerts(now),
        resources: resources(now),
        volunteers: volunteers(now),
        contacts: contacts(),
        weather_alerts: weather_alerts(now),
    }
}

fn location(point: GeoPoint, address: Option<&str>) -> Location {
    Location {
        lat: point.lat,
        lng: point.lng,
        address: address.map(String::from),
    }
}

fn site(lat: f64, lng: f64, address: &str) -> SiteLocation {
    SiteLocation {
        lat,
        lng,
        address: address.to_string(),
    }
}

fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert {
            id: "1".to_string(),
            title: "Flash Flood Warning".to_string(),
            description: "Heavy rainfall causing rapid flooding in low-lying areas. \
                          Seek higher ground immediately."
                .to_string(),
            level: Severity::Critical,
            disaster_type: DisasterType::Flood,
            timestamp: now - Duration::minutes(30),
            location: location(DOWNTOWN, Some("Los Angeles, CA")),
            source: AlertSource::Official,
        },
        Alert {
            id: "2".to_string(),
            title: "Road Closure".to_string(),
            description: "Main Street bridge collapsed due to flooding. Use alternate routes."
                .to_string(),
            level: Severity::High,
            disaster_type: DisasterType::Flood,
            timestamp: now - Duration::minutes(120),
            location: location(DOWNTOWN, Some("Los Angeles, CA")),
            source: AlertSource::Official,
        },
        Alert {
            id: "3".to_string(),
            title: "Family Trapped".to_string(),
            description: "Family of 4 trapped on roof near River Road and 5th Street. \
                          Need boat rescue."
                .to_string(),
            level: Severity::Critical,
            disaster_type: DisasterType::Flood,
            timestamp: now - Duration::minutes(45),
            location: location(GeoPoint::new(34.055_235, -118.253_683), None),
            source: AlertSource::User,
        },
    ]
}

fn resources(now: DateTime<Utc>) -> Vec<Resource> {
    vec![
        Resource {
            id: "1".to_string(),
            name: "Drinking Water Distribution".to_string(),
            resource_type: ResourceType::Water,
            description: "Bottled water available for pickup. 2 cases per family.".to_string(),
            quantity: Some(200),
            location: site(
                34.052_235,
                -118.243_683,
                "Community Center, 123 Main St, Los Angeles, CA",
            ),
            contact_name: "Relief Coordinator".to_string(),
            contact_phone: Some("555-123-4567".to_string()),
            timestamp: now - Duration::hours(3),
            verified: true,
        },
        Resource {
            id: "2".to_string(),
            name: "Temporary Shelter".to_string(),
            resource_type: ResourceType::Shelter,
            description: "Gymnasium open for emergency shelter. Cots and blankets available."
                .to_string(),
            quantity: None,
            location: site(
                34.055_235,
                -118.243_683,
                "Central High School, 500 Education Blvd, Los Angeles, CA",
            ),
            contact_name: "Shelter Manager".to_string(),
            contact_phone: Some("555-987-6543".to_string()),
            timestamp: now - Duration::hours(5),
            verified: true,
        },
        Resource {
            id: "3".to_string(),
            name: "Medical Station".to_string(),
            resource_type: ResourceType::Medical,
            description: "First aid, medication refills, and basic medical care available."
                .to_string(),
            quantity: None,
            location: site(
                34.056_235,
                -118.249_683,
                "Urgent Care Clinic, 789 Health Ave, Los Angeles, CA",
            ),
            contact_name: "Dr. Rivera".to_string(),
            contact_phone: Some("555-111-2222".to_string()),
            timestamp: now - Duration::hours(2),
            verified: true,
        },
    ]
}

fn contact(
    id: &str,
    name: &str,
    description: &str,
    phone: &str,
    address: &str,
    website: &str,
    category: ContactCategory,
) -> EmergencyContact {
    EmergencyContact {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        phone: phone.to_string(),
        address: Some(address.to_string()),
        website: Some(website.to_string()),
        category,
    }
}

fn contacts() -> Vec<EmergencyContact> {
    vec![
        contact(
            "1",
            "City Police Department",
            "Emergency police services",
            "911",
            "123 Safety Blvd, Los Angeles, CA",
            "https://police.example.gov",
            ContactCategory::Police,
        ),
        contact(
            "2",
            "Fire & Rescue",
            "Fire and rescue services",
            "911",
            "456 Rescue Lane, Los Angeles, CA",
            "https://fire.example.gov",
            ContactCategory::Fire,
        ),
        contact(
            "3",
            "General Hospital",
            "24/7 emergency medical services",
            "555-111-2222",
            "789 Health Ave, Los Angeles, CA",
            "https://hospital.example.org",
            ContactCategory::Medical,
        ),
        contact(
            "4",
            "Red Cross Local Chapter",
            "Disaster relief and assistance",
            "555-333-4444",
            "101 Helping Way, Los Angeles, CA",
            "https://redcross.example.org",
            ContactCategory::Ngo,
        ),
        contact(
            "5",
            "FEMA Regional Office",
            "Federal disaster assistance",
            "555-555-6666",
            "202 Federal Blvd, Los Angeles, CA",
            "https://fema.example.gov",
            ContactCategory::Government,
        ),
    ]
}

fn weather_alerts(now: DateTime<Utc>) -> Vec<WeatherAlert> {
    vec![
        WeatherAlert {
            id: "1".to_string(),
            weather_type: WeatherType::Flood,
            severity: Severity::High,
            title: "Flash Flood Warning".to_string(),
            description: "Heavy rainfall expected to continue for next 12 hours. \
                          Potential for flash flooding in low-lying areas."
                .to_string(),
            start_time: now,
            end_time: Some(now + Duration::hours(12)),
            affected_area: AffectedArea {
                name: "Los Angeles County".to_string(),
                center: DOWNTOWN,
                radius_km: Some(50.0),
            },
        },
        WeatherAlert {
            id: "2".to_string(),
            weather_type: WeatherType::Wind,
            severity: Severity::Medium,
            title: "High Wind Advisory".to_string(),
            description: "Winds of 30-40 mph with gusts up to 60 mph expected. \
                          Secure loose objects and be cautious when driving."
                .to_string(),
            start_time: now,
            end_time: Some(now + Duration::hours(24)),
            affected_area: AffectedArea {
                name: "Coastal Regions".to_string(),
                center: DOWNTOWN,
                radius_km: Some(30.0),
            },
        },
    ]
}

fn volunteer(
    id: &str,
    name: &str,
    phone: &str,
    skills: [VolunteerSkill; 2],
    availability: Availability,
    place: Location,
    verified: bool,
) -> Volunteer {
    let handle = name
        .split_whitespace()
        .next()
        .unwrap_or(name)
        .to_lowercase();
    Volunteer {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: Some(format!("{handle}@example.com")),
        skills: skills.into_iter().collect(),
        availability,
        location: Some(place),
        verified,
    }
}

fn volunteers(now: DateTime<Utc>) -> Vec<Volunteer> {
    let available = |days: i64, all_day: bool| Availability {
        start_date: now,
        end_date: Some(now + Duration::days(days)),
        all_day,
    };

    vec![
        volunteer(
            "1",
            "Alex Johnson",
            "555-123-4567",
            [VolunteerSkill::Medical, VolunteerSkill::Rescue],
            available(7, true),
            location(DOWNTOWN, Some("Los Angeles, CA")),
            true,
        ),
        volunteer(
            "2",
            "Sam Rodriguez",
            "555-987-6543",
            [VolunteerSkill::Transport, VolunteerSkill::Construction],
            available(3, false),
            location(GeoPoint::new(34.058_235, -118.253_683), Some("Pasadena, CA")),
            true,
        ),
        volunteer(
            "3",
            "Jordan Lee",
            "555-456-7890",
            [VolunteerSkill::Cooking, VolunteerSkill::Coordination],
            available(5, true),
            location(GeoPoint::new(34.051_235, -118.263_683), Some("Santa Monica, CA")),
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time::format_elapsed;

    #[test]
    fn test_fixture_counts() {
        let data = dataset(Utc::now());
        assert_eq!(data.alerts.len(), 3);
        assert_eq!(data.resources.len(), 3);
        assert_eq!(data.contacts.len(), 5);
        assert_eq!(data.weather_alerts.len(), 2);
        assert_eq!(data.volunteers.len(), 3);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_timestamps_are_relative_to_now() {
        let now = Utc::now();
        let data = dataset(now);
        assert_eq!(format_elapsed(data.alerts[0].timestamp, now), "30 minutes ago");
        assert_eq!(format_elapsed(data.alerts[1].timestamp, now), "2 hours ago");
        assert_eq!(format_elapsed(data.resources[1].timestamp, now), "5 hours ago");
    }

    #[test]
    fn test_volunteer_emails() {
        let data = dataset(Utc::now());
        assert_eq!(data.volunteers[0].email.as_deref(), Some("alex@example.com"));
        assert_eq!(data.volunteers[2].email.as_deref(), Some("jordan@example.com"));
    }
}
