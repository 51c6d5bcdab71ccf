//! Mapping from severity and category tags to display descriptors.
//!
//! Every function here is total over its tag enum, including the
//! `Unrecognized` arm, so a value the dashboard has never seen still renders
//! with a sensible icon and color instead of failing.
//!
//! The descriptors are abstract: an [`IconKind`] resolves to a terminal glyph
//! and a [`StyleClass`] to a theme color at render time.

use crate::domain::{ContactCategory, ResourceType, Severity, WeatherType};
use crate::query::MapItemKind;

/// Abstract icon identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    AlertCircle,
    AlertTriangle,
    Info,
    CheckCircle,
    Flame,
    Stethoscope,
    Heart,
    Landmark,
    Help,
    Droplets,
    Home,
    Pill,
    ShoppingBag,
    Truck,
    CloudRain,
    Wind,
    Thermometer,
    Snowflake,
    User,
}

impl IconKind {
    /// Single-column glyph drawn for this icon.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::AlertCircle => "◉",
            Self::AlertTriangle => "▲",
            Self::Info => "ℹ",
            Self::CheckCircle => "✓",
            Self::Flame => "♨",
            Self::Stethoscope => "✚",
            Self::Heart => "♥",
            Self::Landmark => "♜",
            Self::Help => "?",
            Self::Droplets => "≈",
            Self::Home => "⌂",
            Self::Pill => "℞",
            Self::ShoppingBag => "▣",
            Self::Truck => "⇶",
            Self::CloudRain => "☂",
            Self::Wind => "≋",
            Self::Thermometer => "°",
            Self::Snowflake => "✻",
            Self::User => "☺",
        }
    }
}

/// Abstract color class, resolved against the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    Emergency,
    Warning,
    Info,
    Success,
    Muted,
}

/// Icon plus color class for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub icon: IconKind,
    pub style: StyleClass,
}

impl Presentation {
    const fn new(icon: IconKind, style: StyleClass) -> Self {
        Self { icon, style }
    }
}

/// Presentation for a severity level.
///
/// | Severity | Icon | Style |
/// |---|---|---|
/// | critical | `AlertCircle` | `Emergency` |
/// | high | `AlertTriangle` | `Warning` |
/// | medium | `Info` | `Info` |
/// | low | `CheckCircle` | `Success` |
/// | unrecognized | `Info` | `Info` |
///
/// # Examples
///
/// ```
/// use reliefboard::domain::Severity;
/// use reliefboard::ui::presentation::{classify_severity, IconKind, StyleClass};
///
/// let shown = classify_severity(&Severity::Critical);
/// assert_eq!(shown.icon, IconKind::AlertCircle);
/// assert_eq!(shown.style, StyleClass::Emergency);
/// ```
#[must_use]
pub const fn classify_severity(severity: &Severity) -> Presentation {
    match severity {
        Severity::Critical => Presentation::new(IconKind::AlertCircle, StyleClass::Emergency),
        Severity::High => Presentation::new(IconKind::AlertTriangle, StyleClass::Warning),
        Severity::Low => Presentation::new(IconKind::CheckCircle, StyleClass::Success),
        Severity::Medium | Severity::Unrecognized(_) => {
            Presentation::new(IconKind::Info, StyleClass::Info)
        }
    }
}

/// Badge text for a severity level; unrecognized levels read `Unknown`.
#[must_use]
pub const fn severity_label(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "Critical",
        Severity::High => "High",
        Severity::Medium => "Medium",
        Severity::Low => "Low",
        Severity::Unrecognized(_) => "Unknown",
    }
}

#[must_use]
pub const fn contact_icon(category: &ContactCategory) -> IconKind {
    match category {
        ContactCategory::Police => IconKind::AlertCircle,
        ContactCategory::Fire => IconKind::Flame,
        ContactCategory::Medical => IconKind::Stethoscope,
        ContactCategory::Ngo => IconKind::Heart,
        ContactCategory::Government => IconKind::Landmark,
        ContactCategory::Other | ContactCategory::Unrecognized(_) => IconKind::Help,
    }
}

#[must_use]
pub const fn resource_icon(resource_type: &ResourceType) -> IconKind {
    match resource_type {
        ResourceType::Water => IconKind::Droplets,
        ResourceType::Shelter => IconKind::Home,
        ResourceType::Medical => IconKind::Pill,
        ResourceType::Food | ResourceType::Clothing => IconKind::ShoppingBag,
        ResourceType::Transportation => IconKind::Truck,
        ResourceType::Other | ResourceType::Unrecognized(_) => IconKind::Help,
    }
}

/// Icon for a weather warning. Storms share the generic alert icon.
#[must_use]
pub const fn weather_icon(weather_type: &WeatherType) -> IconKind {
    match weather_type {
        WeatherType::Flood => IconKind::CloudRain,
        WeatherType::Wind => IconKind::Wind,
        WeatherType::Heat => IconKind::Thermometer,
        WeatherType::Cold => IconKind::Snowflake,
        WeatherType::Storm | WeatherType::Other | WeatherType::Unrecognized(_) => {
            IconKind::AlertCircle
        }
    }
}

#[must_use]
pub const fn map_icon(kind: MapItemKind) -> IconKind {
    match kind {
        MapItemKind::Alert => IconKind::AlertTriangle,
        MapItemKind::Resource => IconKind::Droplets,
        MapItemKind::Weather => IconKind::CloudRain,
        MapItemKind::Volunteer => IconKind::User,
    }
}

/// Style of a verification badge.
#[must_use]
pub const fn verified_style(verified: bool) -> StyleClass {
    if verified {
        StyleClass::Success
    } else {
        StyleClass::Muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_table() {
        let cases = [
            (Severity::Critical, IconKind::AlertCircle, StyleClass::Emergency, "Critical"),
            (Severity::High, IconKind::AlertTriangle, StyleClass::Warning, "High"),
            (Severity::Medium, IconKind::Info, StyleClass::Info, "Medium"),
            (Severity::Low, IconKind::CheckCircle, StyleClass::Success, "Low"),
        ];

        for (severity, icon, style, label) in cases {
            assert_eq!(classify_severity(&severity), Presentation { icon, style });
            assert_eq!(severity_label(&severity), label);
        }
    }

    #[test]
    fn test_unrecognized_severity_presents_as_medium() {
        let unknown = Severity::Unrecognized("extreme".to_string());
        assert_eq!(classify_severity(&unknown), classify_severity(&Severity::Medium));
        assert_eq!(severity_label(&unknown), "Unknown");
    }

    #[test]
    fn test_contact_icons() {
        assert_eq!(contact_icon(&ContactCategory::Police), IconKind::AlertCircle);
        assert_eq!(contact_icon(&ContactCategory::Ngo), IconKind::Heart);
        assert_eq!(contact_icon(&ContactCategory::Government), IconKind::Landmark);
        assert_eq!(
            contact_icon(&ContactCategory::Unrecognized("militia".into())),
            IconKind::Help
        );
    }

    #[test]
    fn test_resource_icons() {
        assert_eq!(resource_icon(&ResourceType::Water), IconKind::Droplets);
        assert_eq!(resource_icon(&ResourceType::Food), IconKind::ShoppingBag);
        assert_eq!(resource_icon(&ResourceType::Clothing), IconKind::ShoppingBag);
        assert_eq!(resource_icon(&ResourceType::Other), IconKind::Help);
    }

    #[test]
    fn test_weather_icons_fall_back_to_alert() {
        assert_eq!(weather_icon(&WeatherType::Flood), IconKind::CloudRain);
        assert_eq!(weather_icon(&WeatherType::Storm), IconKind::AlertCircle);
        assert_eq!(
            weather_icon(&WeatherType::Unrecognized("hail".into())),
            IconKind::AlertCircle
        );
    }

    #[test]
    fn test_glyphs_are_single_chars() {
        let icons = [
            IconKind::AlertCircle,
            IconKind::Help,
            IconKind::Truck,
            IconKind::User,
            IconKind::Snowflake,
        ];
        for icon in icons {
            assert_eq!(icon.glyph().chars().count(), 1, "{icon:?}");
        }
    }
}
