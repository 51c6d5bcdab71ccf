//! Domain layer for reliefboard.
//!
//! This module contains the record types the dashboard displays and the pure
//! time formatting they need, independent of Zellij-specific APIs or storage
//! concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`tags`]: Closed tag enumerations with an `Unrecognized` fallback
//! - [`location`]: Geographic positions
//! - [`alert`], [`resource`], [`weather`], [`contact`], [`volunteer`]: Records
//! - [`dataset`]: The snapshot holding every collection
//! - [`time`]: Relative and absolute time strings
//!
//! # Examples
//!
//! ```
//! use reliefboard::domain::{Result, Severity};
//!
//! fn parse_level(raw: &str) -> Result<Severity> {
//!     Ok(raw.parse().unwrap_or_else(|never| match never {}))
//! }
//!
//! assert_eq!(parse_level("high").unwrap(), Severity::High);
//! assert!(!parse_level("extreme").unwrap().is_known());
//! ```

pub mod alert;
pub mod contact;
pub mod dataset;
pub mod error;
pub mod location;
pub mod resource;
pub mod tags;
pub mod time;
pub mod volunteer;
pub mod weather;

pub use alert::Alert;
pub use contact::EmergencyContact;
pub use dataset::Dataset;
pub use error::{ReliefError, Result};
pub use location::{GeoPoint, Location, SiteLocation};
pub use resource::Resource;
pub use tags::{
    AlertSource, ContactCategory, DisasterType, ResourceType, Severity, VolunteerSkill,
    WeatherType,
};
pub use volunteer::{Availability, Volunteer, VolunteerRegistration};
pub use weather::{AffectedArea, WeatherAlert};
