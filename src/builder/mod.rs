//! Model builder (verb module)
//!
//! Accumulates entity registrations against a type-description set, then
//! assembles them into an immutable `Model`. Registration is mutable state
//! owned by one builder; `build` is a pure read that can run any number of
//! times, each producing an independent model.

mod assemble;
mod classify;
mod keys;
mod naming;

pub use naming::NamingPolicy;

use crate::describe::TypeSet;
use crate::model::Model;
use assemble::Assembler;
use naming::default_collection_name;
use std::collections::HashMap;

/// The registration record for one entity type
///
/// Created implicitly the first time any registration call references the
/// type; mutated by later calls; never deleted.
#[derive(Debug, Clone)]
pub struct EntityConfig {
    /// The type being modeled
    pub type_name: String,
    /// Declared key member names, registration order, no duplicates.
    /// Empty means "infer from annotations at build time".
    pub key_names: Vec<String>,
    /// Exposed collection ("entity set") name
    pub collection_name: Option<String>,
}

impl EntityConfig {
    pub(crate) fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            key_names: Vec::new(),
            collection_name: None,
        }
    }
}

/// Builds a queryable entity model from registered type descriptions
///
/// Not intended for concurrent registration from multiple threads without
/// external synchronization.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    types: TypeSet,
    naming: NamingPolicy,
    entities: Vec<EntityConfig>,
    index: HashMap<String, usize>,
}

impl ModelBuilder {
    /// A builder over `types` with the default naming policy
    pub fn new(types: TypeSet) -> Self {
        Self::with_naming(types, NamingPolicy::Default)
    }

    /// A builder over `types` with an explicit naming policy
    pub fn with_naming(types: TypeSet, naming: NamingPolicy) -> Self {
        Self {
            types,
            naming,
            entities: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn naming(&self) -> NamingPolicy {
        self.naming
    }

    pub fn type_set(&self) -> &TypeSet {
        &self.types
    }

    /// Registered entity configurations, registration order
    pub fn entities(&self) -> &[EntityConfig] {
        &self.entities
    }

    /// Get-or-create the registration record for `type_name`
    ///
    /// A new record starts with no keys and a default collection name: the
    /// type's simple name lowercased and pluralized, passed through the
    /// naming policy. Never fails.
    pub fn ensure(&mut self, type_name: &str) -> &mut EntityConfig {
        let idx = match self.index.get(type_name) {
            Some(&idx) => idx,
            None => {
                let mut config = EntityConfig::new(type_name);
                config.collection_name =
                    Some(self.naming.apply(&default_collection_name(type_name)));
                let idx = self.entities.len();
                self.entities.push(config);
                self.index.insert(type_name.to_string(), idx);
                idx
            }
        };
        &mut self.entities[idx]
    }

    /// Register `type_name` as an entity type
    pub fn add_entity(&mut self, type_name: &str) -> &mut Self {
        self.ensure(type_name);
        self
    }

    /// Register `type_name` with an optional explicit key and collection name
    pub fn add_entity_with(
        &mut self,
        type_name: &str,
        key_name: Option<&str>,
        collection_name: Option<&str>,
    ) -> &mut Self {
        self.ensure(type_name);
        if let Some(key) = key_name {
            self.add_key(type_name, key);
        }
        if let Some(collection) = collection_name {
            self.set_collection_name(type_name, collection);
        }
        self
    }

    /// Append `key_name` to the type's declared keys if not already present
    pub fn add_key(&mut self, type_name: &str, key_name: &str) -> &mut Self {
        let config = self.ensure(type_name);
        if !config.key_names.iter().any(|k| k == key_name) {
            config.key_names.push(key_name.to_string());
        }
        self
    }

    /// Overwrite the type's exposed collection name; last write wins
    pub fn set_collection_name(&mut self, type_name: &str, collection_name: &str) -> &mut Self {
        let config = self.ensure(type_name);
        config.collection_name = Some(collection_name.to_string());
        self
    }

    /// Assemble the registered definitions into a finished model
    ///
    /// Deterministic given a fixed registration order. Works on a clone of
    /// the registration set, so the builder is readable concurrently and a
    /// produced model is never retroactively affected by later registration.
    pub fn build(&self) -> Model {
        Assembler::run(&self.types, self.naming, self.entities.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{Member, MemberType, TypeDescription};

    fn directory_types() -> TypeSet {
        TypeSet::new()
            .with_type(
                TypeDescription::new("Person")
                    .with_member(Member::new("Id", MemberType::I32).as_key())
                    .with_member(Member::new("Name", MemberType::Text))
                    .with_member(Member::new("DateOfBirth", MemberType::Date)),
            )
            .with_type(
                TypeDescription::new("Employee")
                    .with_base("Person")
                    .with_member(Member::new("HireDate", MemberType::Date))
                    .with_member(Member::new("Boss", MemberType::Reference("Employee".into())))
                    .with_member(Member::new("Badges", MemberType::Array)),
            )
    }

    #[test]
    fn test_ensure_applies_default_collection_name() {
        let mut builder = ModelBuilder::new(directory_types());
        let config = builder.ensure("Person");
        assert_eq!(config.collection_name.as_deref(), Some("persons"));
    }

    #[test]
    fn test_add_key_is_idempotent() {
        let mut builder = ModelBuilder::new(directory_types());
        builder.add_key("Person", "Id").add_key("Person", "Id");
        assert_eq!(builder.entities()[0].key_names, vec!["Id"]);
    }

    #[test]
    fn test_set_collection_name_last_write_wins() {
        let mut builder = ModelBuilder::new(directory_types());
        builder.set_collection_name("Person", "people");
        builder.set_collection_name("Person", "persons2");
        assert_eq!(
            builder.entities()[0].collection_name.as_deref(),
            Some("persons2")
        );
    }

    #[test]
    fn test_build_attaches_simple_and_navigation_properties() {
        let mut builder = ModelBuilder::new(directory_types());
        builder.add_entity("Person").add_entity("Employee");
        let model = builder.build();

        let employee = model.get("Employee").unwrap();
        // Own-declared only: inherited members live on the Person record
        assert_eq!(employee.properties.len(), 1);
        assert_eq!(employee.properties[0].name, "HireDate");
        // Self-referential member classifies as navigation, Badges excluded
        assert_eq!(employee.navigations.len(), 1);
        assert_eq!(employee.navigations[0].target, "Employee");
    }

    #[test]
    fn test_build_discovers_unregistered_base() {
        let mut builder = ModelBuilder::new(directory_types());
        builder.add_entity("Employee");
        let model = builder.build();

        // Person was never registered but is discoverable and assembled
        let person = model.get("Person").unwrap();
        assert_eq!(person.keys.len(), 1);
        let employee = model.get("Employee").unwrap();
        assert_eq!(model.base_of(employee).unwrap().name, "Person");
    }

    #[test]
    fn test_build_is_repeatable_and_isolated() {
        let mut builder = ModelBuilder::new(directory_types());
        builder.add_entity("Person");
        let first = builder.build();
        builder.add_entity("Employee");
        let second = builder.build();

        assert!(first.get("Employee").is_none());
        assert!(second.get("Employee").is_some());
    }

    #[test]
    fn test_unregistered_navigation_target_is_excluded() {
        let types = TypeSet::new().with_type(
            TypeDescription::new("Order")
                .with_member(Member::new("Id", MemberType::I32).as_key())
                .with_member(Member::new("Customer", MemberType::Reference("Customer".into()))),
        );
        let mut builder = ModelBuilder::new(types);
        builder.add_entity("Order");
        let model = builder.build();

        let order = model.get("Order").unwrap();
        assert!(order.navigations.is_empty());
        assert_eq!(order.properties.len(), 1);
    }

    #[test]
    fn test_camel_case_naming_applies_to_properties() {
        let mut builder =
            ModelBuilder::with_naming(directory_types(), NamingPolicy::CamelCase);
        builder.add_entity("Employee");
        let model = builder.build();

        let employee = model.get("Employee").unwrap();
        assert_eq!(employee.properties[0].exposed_name, "hireDate");
        assert_eq!(employee.navigations[0].exposed_name, "boss");
    }
}
