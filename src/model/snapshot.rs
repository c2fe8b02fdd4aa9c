//! The assembled model: schema arena plus collection roots

use super::entity::{EntitySchema, NavigationProperty, Property};
use std::collections::HashMap;

/// Either kind of property, as found by a base-chain lookup
#[derive(Debug, Clone, Copy)]
pub enum PropertyRef<'a> {
    Simple(&'a Property),
    Navigation(&'a NavigationProperty),
}

/// The finished, immutable aggregate of one `build()` invocation
///
/// Schema records live in an arena in assembly order; base links and
/// collection roots are arena indexes. Later builder mutation never touches a
/// model that has already been produced.
#[derive(Debug, Clone, Default)]
pub struct Model {
    schemas: Vec<EntitySchema>,
    by_name: HashMap<String, usize>,
    collections: HashMap<String, usize>,
}

impl Model {
    /// All schema records, assembly order
    pub fn schemas(&self) -> &[EntitySchema] {
        &self.schemas
    }

    /// Schema record by type identity
    pub fn get(&self, name: &str) -> Option<&EntitySchema> {
        self.by_name.get(name).map(|&idx| &self.schemas[idx])
    }

    /// Schema record by arena index
    pub fn schema_at(&self, index: usize) -> &EntitySchema {
        &self.schemas[index]
    }

    /// The entity type rooting a collection name
    pub fn collection(&self, name: &str) -> Option<&EntitySchema> {
        self.collection_index(name).map(|idx| &self.schemas[idx])
    }

    /// Arena index of the entity type rooting a collection name
    pub fn collection_index(&self, name: &str) -> Option<usize> {
        self.collections.get(name).copied()
    }

    /// Collection name / rooting entity pairs
    pub fn collections(&self) -> impl Iterator<Item = (&str, &EntitySchema)> {
        self.collections
            .iter()
            .map(|(name, &idx)| (name.as_str(), &self.schemas[idx]))
    }

    /// The base record of a schema, if it has one
    pub fn base_of(&self, schema: &EntitySchema) -> Option<&EntitySchema> {
        schema.base.map(|idx| &self.schemas[idx])
    }

    /// The target record of a navigation property
    pub fn navigation_target(&self, nav: &NavigationProperty) -> Option<&EntitySchema> {
        self.get(&nav.target)
    }

    /// Resolve an exposed property name against a schema, walking the base
    /// chain from the record itself toward the root
    pub fn property<'a>(
        &'a self,
        schema: &'a EntitySchema,
        exposed_name: &str,
    ) -> Option<PropertyRef<'a>> {
        let mut current = Some(schema);
        while let Some(record) = current {
            if let Some(p) = record.property(exposed_name) {
                return Some(PropertyRef::Simple(p));
            }
            if let Some(n) = record.navigation(exposed_name) {
                return Some(PropertyRef::Navigation(n));
            }
            current = self.base_of(record);
        }
        None
    }

    /// The effective key set of a schema: keys applied on ancestor records
    /// first (root of the chain outward), then the record's own
    pub fn effective_keys<'a>(&'a self, schema: &'a EntitySchema) -> Vec<&'a Property> {
        let mut chain = vec![schema];
        let mut current = self.base_of(schema);
        while let Some(record) = current {
            chain.push(record);
            current = self.base_of(record);
        }
        chain
            .into_iter()
            .rev()
            .flat_map(|record| record.keys.iter())
            .collect()
    }

    pub(crate) fn insert(&mut self, schema: EntitySchema) -> usize {
        let index = self.schemas.len();
        self.by_name.insert(schema.name.clone(), index);
        self.schemas.push(schema);
        index
    }

    pub(crate) fn insert_collection(&mut self, name: impl Into<String>, index: usize) {
        self.collections.insert(name.into(), index);
    }
}
