//! Derived views over a loaded dataset.
//!
//! - [`filter`]: search-term and categorical filtering for every record type
//! - [`layers`]: map layer selection and map item derivation
//!
//! Both are pure: they borrow the immutable dataset and are recomputed on
//! every query change.

pub mod filter;
pub mod layers;

pub use filter::{
    filter, match_ranges, CategoricalField, FilterKey, FilterQuery, FilterValue, Filterable,
};
pub use layers::{map_items, visible, Layer, LayerSet, MapItem, MapItemKind};
