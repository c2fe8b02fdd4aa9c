//! Member classification: simple, navigation, or excluded

use crate::describe::MemberType;
use std::collections::HashSet;

/// The classification of one declared member
///
/// Total and mutually exclusive over the member set considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberKind {
    /// Scalar-valued; becomes a simple property
    Simple,
    /// Refers to a modeled entity; becomes a navigation property
    Navigation,
    /// Arrays, enumerations, references to unmodeled types
    Excluded,
}

/// Classify a member by its declared type against the modeled entity names
///
/// Navigation takes precedence: a reference to a modeled entity is a
/// navigation property even when the entity shares its name with a type that
/// would otherwise read as scalar-like. Multi-valued members are excluded
/// regardless of element type.
pub(crate) fn classify(ty: &MemberType, entities: &HashSet<String>) -> MemberKind {
    match ty {
        MemberType::Reference(name) => {
            if entities.contains(name.as_str()) {
                MemberKind::Navigation
            } else {
                MemberKind::Excluded
            }
        }
        MemberType::Array | MemberType::Enum => MemberKind::Excluded,
        _ => MemberKind::Simple,
    }
}
