//! Shared test utilities for integration tests

use edmquery::{ModelBuilder, NamingPolicy, TypeSet};

/// Load a type-description fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> TypeSet {
    let path = format!("tests/test_data/{}", name);
    TypeSet::from_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// A camel-case builder over the directory fixture (Person, Employee,
/// Department)
pub fn directory_builder() -> ModelBuilder {
    ModelBuilder::with_naming(load_fixture("directory.yaml"), NamingPolicy::CamelCase)
}
