//! Key resolution: effective key member names for one entity type

use super::EntityConfig;
use crate::describe::TypeSet;

/// Resolve the effective key member names for `config`
///
/// Explicit key names win and are resolved against the full member set (own
/// and inherited) in registration order; names that resolve to no member are
/// silently skipped — explicit configuration is advisory, not binding. With
/// no explicit names, members carrying the key annotation across the full
/// member set become the keys, and the inference is cached back into the
/// config so the same build never discovers them twice.
///
/// Zero resolvable keys is permitted: the type builds as an un-keyed,
/// non-addressable-by-id entity.
pub(crate) fn resolve_keys(config: &mut EntityConfig, types: &TypeSet) -> Vec<String> {
    if !config.key_names.is_empty() {
        return config
            .key_names
            .iter()
            .filter(|name| types.member(&config.type_name, name).is_some())
            .cloned()
            .collect();
    }

    let inferred: Vec<String> = types
        .all_members(&config.type_name)
        .into_iter()
        .filter(|m| m.key)
        .map(|m| m.name.clone())
        .collect();
    config.key_names = inferred.clone();
    inferred
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{Member, MemberType, TypeDescription};

    fn person_types() -> TypeSet {
        TypeSet::new()
            .with_type(
                TypeDescription::new("Person")
                    .with_member(Member::new("Id", MemberType::I32).as_key())
                    .with_member(Member::new("Name", MemberType::Text)),
            )
            .with_type(
                TypeDescription::new("Employee")
                    .with_base("Person")
                    .with_member(Member::new("HireDate", MemberType::Date)),
            )
    }

    #[test]
    fn test_explicit_keys_resolve_in_order() {
        let types = person_types();
        let mut config = EntityConfig::new("Person");
        config.key_names = vec!["Name".to_string(), "Id".to_string()];
        assert_eq!(resolve_keys(&mut config, &types), vec!["Name", "Id"]);
    }

    #[test]
    fn test_unresolvable_explicit_key_is_dropped() {
        let types = person_types();
        let mut config = EntityConfig::new("Person");
        config.key_names = vec!["Id".to_string(), "NoSuchMember".to_string()];
        assert_eq!(resolve_keys(&mut config, &types), vec!["Id"]);
    }

    #[test]
    fn test_annotation_inference_spans_inherited_members() {
        let types = person_types();
        let mut config = EntityConfig::new("Employee");
        assert_eq!(resolve_keys(&mut config, &types), vec!["Id"]);
        // Inference is cached
        assert_eq!(config.key_names, vec!["Id"]);
    }

    #[test]
    fn test_no_keys_is_permitted() {
        let types = TypeSet::new().with_type(
            TypeDescription::new("Note").with_member(Member::new("Text", MemberType::Text)),
        );
        let mut config = EntityConfig::new("Note");
        assert!(resolve_keys(&mut config, &types).is_empty());
    }
}
