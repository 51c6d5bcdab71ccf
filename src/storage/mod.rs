//! Storage layer: where dashboard records come from.
//!
//! There is no real persistence. Sources serve a dataset for reads and echo
//! writes back without storing them.
//!
//! # Modules
//!
//! - `backend`: [`DataSource`] trait, snapshot adapter and id generation
//! - `fixtures`: built-in sample dataset
//! - `json`: JSON dataset file source
//! - `loader`: concurrent all-or-nothing bulk load

pub mod backend;
pub mod fixtures;
pub mod json;
pub mod loader;

pub use backend::{generate_id, DataSource, SnapshotSource};
pub use fixtures::FixtureSource;
pub use json::JsonSource;
pub use loader::load_dataset;
