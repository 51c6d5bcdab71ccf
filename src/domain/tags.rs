//! Closed tag enumerations used by the record types.
//!
//! Every enum here has one variant per known wire value plus an
//! `Unrecognized(String)` arm that keeps unknown input verbatim. Parsing is
//! infallible, so data from a newer or malformed source never fails to load;
//! consumers match the `Unrecognized` arm explicitly and pick a default.
//!
//! The wire format is the lowercase name (`"critical"`, `"earthquake"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generates a tag enum with its wire-name table, `FromStr`, `Display` and
/// string-based serde conversions.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the known set, kept as received.
            Unrecognized(String),
        }

        impl $name {
            /// Every known variant, in declaration order.
            pub const KNOWN: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Wire names of the known variants, in declaration order.
            pub const NAMES: &'static [&'static str] = &[ $( $wire ),+ ];

            /// Returns the wire name of this value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Unrecognized(raw) => raw.as_str(),
                }
            }

            /// Returns `true` unless this is the `Unrecognized` arm.
            #[must_use]
            pub const fn is_known(&self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }

            /// Returns the wire name with its first letter upper-cased.
            #[must_use]
            pub fn label(&self) -> String {
                capitalize(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(match s {
                    $( $wire => Self::$variant, )+
                    other => Self::Unrecognized(other.to_string()),
                })
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.parse() {
                    Ok(tag) => tag,
                    Err(never) => match never {},
                }
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> Self {
                match tag {
                    $name::Unrecognized(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Upper-cases the first character of `s`.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

tag_enum! {
    /// Urgency of an alert or weather warning, most urgent first.
    Severity {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

tag_enum! {
    /// Kind of disaster an [`Alert`](super::Alert) reports.
    DisasterType {
        Flood => "flood",
        Earthquake => "earthquake",
        Tsunami => "tsunami",
        Fire => "fire",
        Hurricane => "hurricane",
        Other => "other",
    }
}

tag_enum! {
    /// Who raised an alert.
    AlertSource {
        Official => "official",
        User => "user",
        System => "system",
    }
}

tag_enum! {
    /// Category of a [`Resource`](super::Resource) offering.
    ResourceType {
        Water => "water",
        Food => "food",
        Shelter => "shelter",
        Medical => "medical",
        Clothing => "clothing",
        Transportation => "transportation",
        Other => "other",
    }
}

tag_enum! {
    /// Meteorological category of a [`WeatherAlert`](super::WeatherAlert).
    WeatherType {
        Storm => "storm",
        Flood => "flood",
        Heat => "heat",
        Cold => "cold",
        Wind => "wind",
        Other => "other",
    }
}

tag_enum! {
    /// Service category of an [`EmergencyContact`](super::EmergencyContact).
    ContactCategory {
        Police => "police",
        Fire => "fire",
        Medical => "medical",
        Ngo => "ngo",
        Government => "government",
        Other => "other",
    }
}

tag_enum! {
    /// A skill a [`Volunteer`](super::Volunteer) offers.
    VolunteerSkill {
        Medical => "medical",
        Rescue => "rescue",
        Transport => "transport",
        Cooking => "cooking",
        Construction => "construction",
        Coordination => "coordination",
        Communication => "communication",
        Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_parse() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("ngo".parse::<ContactCategory>().unwrap(), ContactCategory::Ngo);
        assert_eq!(
            "transportation".parse::<ResourceType>().unwrap(),
            ResourceType::Transportation
        );
    }

    #[test]
    fn test_unknown_value_is_kept_verbatim() {
        let tag: Severity = "catastrophic".parse().unwrap();
        assert_eq!(tag, Severity::Unrecognized("catastrophic".to_string()));
        assert_eq!(tag.as_str(), "catastrophic");
        assert!(!tag.is_known());
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let tag: Severity = "Critical".parse().unwrap();
        assert!(!tag.is_known());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&DisasterType::Earthquake).unwrap();
        assert_eq!(json, "\"earthquake\"");

        let parsed: DisasterType = serde_json::from_str("\"volcano\"").unwrap();
        assert_eq!(parsed, DisasterType::Unrecognized("volcano".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"volcano\"");
    }

    #[test]
    fn test_label_capitalizes() {
        assert_eq!(VolunteerSkill::Rescue.label(), "Rescue");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_known_table_lists_every_variant() {
        assert_eq!(Severity::KNOWN.len(), 4);
        assert_eq!(VolunteerSkill::KNOWN.len(), 8);
        assert!(Severity::KNOWN.iter().all(Severity::is_known));
        assert_eq!(Severity::NAMES, &["critical", "high", "medium", "low"]);
        assert!(Severity::KNOWN
            .iter()
            .zip(Severity::NAMES)
            .all(|(tag, name)| tag.as_str() == *name));
    }
}
