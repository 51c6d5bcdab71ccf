//! Map layers: which kinds of located records the map page shows.
//!
//! Each [`MapItem`] carries a typed [`MapItemKind`], and every kind maps to
//! exactly one [`Layer`]. Visibility is decided through that mapping, so a
//! kind can never name a layer that does not exist.

use crate::domain::{Dataset, GeoPoint};
use std::collections::BTreeSet;
use std::fmt;

/// A toggleable map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Alerts,
    Resources,
    Weather,
    Volunteers,
}

impl Layer {
    /// Every layer, in toggle-key order (`1`-`4`).
    pub const ALL: [Self; 4] = [Self::Alerts, Self::Resources, Self::Weather, Self::Volunteers];

    /// Stable identifier of the layer.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Alerts => "alerts",
            Self::Resources => "resources",
            Self::Weather => "weather",
            Self::Volunteers => "volunteers",
        }
    }

    /// Human-readable name for the layer toggle.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alerts => "Alerts",
            Self::Resources => "Resources",
            Self::Weather => "Weather",
            Self::Volunteers => "Volunteers",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The set of active layers.
///
/// A fresh set shows alerts, resources and weather; volunteers start hidden.
///
/// # Examples
///
/// ```
/// use reliefboard::query::layers::{Layer, LayerSet};
///
/// let mut layers = LayerSet::default();
/// assert!(!layers.contains(Layer::Volunteers));
///
/// layers.toggle(Layer::Volunteers);
/// layers.toggle(Layer::Volunteers);
/// assert_eq!(layers, LayerSet::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSet {
    active: BTreeSet<Layer>,
}

impl Default for LayerSet {
    fn default() -> Self {
        Self {
            active: [Layer::Alerts, Layer::Resources, Layer::Weather]
                .into_iter()
                .collect(),
        }
    }
}

impl LayerSet {
    /// A set with no active layers.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            active: BTreeSet::new(),
        }
    }

    /// Removes `layer` if it is active, adds it otherwise.
    pub fn toggle(&mut self, layer: Layer) {
        if !self.active.remove(&layer) {
            self.active.insert(layer);
        }
        tracing::debug!(layer = %layer, active = self.contains(layer), "layer toggled");
    }

    #[must_use]
    pub fn contains(&self, layer: Layer) -> bool {
        self.active.contains(&layer)
    }

    /// Active layers in [`Layer::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.active.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl FromIterator<Layer> for LayerSet {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

/// What a map item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapItemKind {
    Alert,
    Resource,
    Weather,
    Volunteer,
}

impl MapItemKind {
    /// The layer that controls this kind's visibility.
    #[must_use]
    pub const fn layer(self) -> Layer {
        match self {
            Self::Alert => Layer::Alerts,
            Self::Resource => Layer::Resources,
            Self::Weather => Layer::Weather,
            Self::Volunteer => Layer::Volunteers,
        }
    }
}

/// A positioned, typed entry on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapItem {
    pub id: String,
    pub kind: MapItemKind,
    pub position: GeoPoint,
    pub title: String,
    pub description: String,
}

/// Items whose kind's layer is active, in input order.
///
/// # Parameters
///
/// * `items` - Map items from [`map_items`]
/// * `layers` - Currently active layers
///
/// # Returns
///
/// Borrowed items; nothing is copied or re-sorted
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use reliefboard::query::{map_items, visible, Layer, LayerSet};
/// use reliefboard::storage::fixtures;
///
/// let items = map_items(&fixtures::dataset(Utc::now()));
/// let mut layers = LayerSet::default();
/// layers.toggle(Layer::Alerts);
/// assert!(visible(&items, &layers).iter().all(|item| item.kind.layer() != Layer::Alerts));
/// ```
#[must_use]
pub fn visible<'a>(items: &'a [MapItem], layers: &LayerSet) -> Vec<&'a MapItem> {
    items
        .iter()
        .filter(|item| layers.contains(item.kind.layer()))
        .collect()
}

/// Derives map items from every located record in `dataset`.
///
/// Items are ordered alerts, resources, weather warnings, then volunteers,
/// each group in dataset order. Volunteers without a location are skipped.
/// A volunteer's description is their capitalized skill list.
#[must_use]
pub fn map_items(dataset: &Dataset) -> Vec<MapItem> {
    let alerts = dataset.alerts.iter().map(|alert| MapItem {
        id: alert.id.clone(),
        kind: MapItemKind::Alert,
        position: alert.location.point(),
        title: alert.title.clone(),
        description: alert.description.clone(),
    });

    let resources = dataset.resources.iter().map(|resource| MapItem {
        id: resource.id.clone(),
        kind: MapItemKind::Resource,
        position: resource.location.point(),
        title: resource.name.clone(),
        description: resource.description.clone(),
    });

    let weather = dataset.weather_alerts.iter().map(|warning| MapItem {
        id: warning.id.clone(),
        kind: MapItemKind::Weather,
        position: warning.affected_area.center,
        title: warning.title.clone(),
        description: warning.description.clone(),
    });

    let volunteers = dataset.volunteers.iter().filter_map(|volunteer| {
        volunteer.location.as_ref().map(|location| MapItem {
            id: volunteer.id.clone(),
            kind: MapItemKind::Volunteer,
            position: location.point(),
            title: volunteer.name.clone(),
            description: volunteer.skill_summary(),
        })
    });

    alerts.chain(resources).chain(weather).chain(volunteers).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures;
    use chrono::Utc;

    fn kinds(items: &[&MapItem]) -> Vec<MapItemKind> {
        items.iter().map(|item| item.kind).collect()
    }

    #[test]
    fn test_default_layers() {
        let layers = LayerSet::default();
        assert!(layers.contains(Layer::Alerts));
        assert!(layers.contains(Layer::Resources));
        assert!(layers.contains(Layer::Weather));
        assert!(!layers.contains(Layer::Volunteers));
        assert_eq!(layers.len(), 3);
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut layers = LayerSet::default();
        layers.toggle(Layer::Weather);
        assert!(!layers.contains(Layer::Weather));
        layers.toggle(Layer::Weather);
        assert!(layers.contains(Layer::Weather));
    }

    #[test]
    fn test_double_toggle_is_identity() {
        for layer in Layer::ALL {
            let mut layers = LayerSet::default();
            layers.toggle(layer);
            layers.toggle(layer);
            assert_eq!(layers, LayerSet::default(), "layer {layer}");
        }
    }

    #[test]
    fn test_volunteer_items_follow_volunteers_layer() {
        let dataset = fixtures::dataset(Utc::now());
        let items = map_items(&dataset);

        let shown = visible(&items, &LayerSet::default());
        assert!(!kinds(&shown).contains(&MapItemKind::Volunteer));

        let mut layers = LayerSet::default();
        layers.toggle(Layer::Volunteers);
        let shown = visible(&items, &layers);
        assert_eq!(
            kinds(&shown)
                .iter()
                .filter(|kind| **kind == MapItemKind::Volunteer)
                .count(),
            dataset.volunteers.len()
        );
    }

    #[test]
    fn test_visible_preserves_order_and_filters() {
        let dataset = fixtures::dataset(Utc::now());
        let items = map_items(&dataset);
        let layers: LayerSet = [Layer::Weather].into_iter().collect();

        let shown = visible(&items, &layers);
        assert_eq!(shown.len(), dataset.weather_alerts.len());
        assert_eq!(shown[0].id, dataset.weather_alerts[0].id);
        assert!(visible(&items, &LayerSet::empty()).is_empty());
    }

    #[test]
    fn test_map_items_skip_unlocated_volunteers() {
        let mut dataset = fixtures::dataset(Utc::now());
        dataset.volunteers[0].location = None;

        let items = map_items(&dataset);
        let volunteers: Vec<_> = items
            .iter()
            .filter(|item| item.kind == MapItemKind::Volunteer)
            .collect();
        assert_eq!(volunteers.len(), dataset.volunteers.len() - 1);
    }

    #[test]
    fn test_volunteer_description_lists_skills() {
        let dataset = fixtures::dataset(Utc::now());
        let items = map_items(&dataset);
        let alex = items
            .iter()
            .find(|item| item.kind == MapItemKind::Volunteer && item.id == "1")
            .unwrap();
        assert_eq!(alex.description, "Medical, Rescue");
    }
}
