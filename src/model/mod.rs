//! Assembled entity model (nouns)
//!
//! The output of `ModelBuilder::build`: one schema record per entity type,
//! base linkage, properties, keys, and the collection roots.

mod entity;
mod snapshot;

pub use entity::{EntitySchema, NavigationProperty, Property};
pub use snapshot::{Model, PropertyRef};
