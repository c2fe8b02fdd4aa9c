//! Integration tests for registration semantics
//!
//! Registration must be idempotent within one identity and order-independent
//! across distinct identities.

mod common;

use common::{directory_builder, load_fixture};
use edmquery::ModelBuilder;

#[test]
fn test_same_key_registered_twice_yields_one_entry() {
    let mut builder = directory_builder();
    builder.add_key("Department", "Id");
    builder.add_key("Department", "Id");
    let model = builder.build();

    let department = model.get("Department").expect("Department should assemble");
    assert_eq!(department.keys.len(), 1);
    assert_eq!(department.keys[0].name, "Id");
}

#[test]
fn test_registration_order_independent_across_identities() {
    let mut first = directory_builder();
    first.add_entity("Person");
    first.add_entity_with("Department", Some("Id"), Some("depts"));

    let mut second = directory_builder();
    second.add_entity_with("Department", Some("Id"), Some("depts"));
    second.add_entity("Person");

    let model_a = first.build();
    let model_b = second.build();

    for name in ["Person", "Department"] {
        let a = model_a.get(name).expect("present in first model");
        let b = model_b.get(name).expect("present in second model");
        let keys_a: Vec<&str> = a.keys.iter().map(|k| k.name.as_str()).collect();
        let keys_b: Vec<&str> = b.keys.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(keys_a, keys_b);
    }
    assert!(model_a.collection("depts").is_some());
    assert!(model_b.collection("depts").is_some());
}

#[test]
fn test_collection_name_last_write_wins() {
    let mut builder = directory_builder();
    builder.set_collection_name("Person", "people");
    builder.set_collection_name("Person", "humans");
    let model = builder.build();

    assert!(model.collection("people").is_none());
    assert_eq!(model.collection("humans").expect("rooted").name, "Person");
}

#[test]
fn test_default_collection_name_is_pluralized() {
    let mut builder = directory_builder();
    builder.add_entity("Person");
    let model = builder.build();

    assert_eq!(model.collection("persons").expect("rooted").name, "Person");
}

#[test]
fn test_unresolvable_explicit_key_is_tolerated() {
    let mut builder = ModelBuilder::new(load_fixture("directory.yaml"));
    builder.add_entity_with("Person", Some("NoSuchMember"), None);
    let model = builder.build();

    // The bad key is dropped, not an error; nothing else declared keys
    let person = model.get("Person").expect("Person should assemble");
    assert!(person.keys.is_empty());
}
