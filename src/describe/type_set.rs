//! Type descriptions and the set they are resolved against

use super::member::Member;
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// The description of one type: identity, base-type link, own-declared members
///
/// This is the statically declared replacement for runtime member
/// enumeration: whoever knows the host types writes (or generates) these
/// records, and the builder consumes nothing else.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TypeDescription {
    pub name: String,
    /// Name of the base type, if any
    pub base: Option<String>,
    /// Own-declared members only; inherited members come from the base chain
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TypeDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            members: Vec::new(),
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Look up an own-declared member by its declared name
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// A set of type descriptions, the unit handed to a `ModelBuilder`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TypeSet {
    pub types: Vec<TypeDescription>,
}

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a type set from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path_str = path.as_ref().display().to_string();
        let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
            path: path_str,
            source: e,
        })?;
        Self::from_yaml(&contents)
    }

    /// Load a type set from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        serde_yaml::from_str(yaml).map_err(ParseError::from)
    }

    pub fn with_type(mut self, description: TypeDescription) -> Self {
        self.types.push(description);
        self
    }

    /// Get a type description by name
    pub fn get(&self, name: &str) -> Option<&TypeDescription> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Ancestor descriptions of `name`, nearest base first
    ///
    /// A malformed description set can declare a base cycle; the walk keeps a
    /// visited set and stops at the first repeat, so the chain is always
    /// finite.
    pub fn ancestors(&self, name: &str) -> Vec<&TypeDescription> {
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(name);
        let mut chain = Vec::new();
        let mut current = self.get(name).and_then(|t| t.base.as_deref());
        while let Some(base_name) = current {
            if !seen.insert(base_name) {
                break;
            }
            let Some(base) = self.get(base_name) else {
                break;
            };
            chain.push(base);
            current = base.base.as_deref();
        }
        chain
    }

    /// The full member set of `name`: inherited members first (root of the
    /// chain outward), then own-declared members, in declaration order
    pub fn all_members(&self, name: &str) -> Vec<&Member> {
        let mut members = Vec::new();
        for ancestor in self.ancestors(name).iter().rev() {
            members.extend(ancestor.members.iter());
        }
        if let Some(own) = self.get(name) {
            members.extend(own.members.iter());
        }
        members
    }

    /// Resolve a member name against the full member set of `name`
    pub fn member(&self, name: &str, member_name: &str) -> Option<&Member> {
        self.all_members(name)
            .into_iter()
            .find(|m| m.name == member_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::MemberType;

    fn chain_set() -> TypeSet {
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
    fn test_ancestors_nearest_first() {
        let types = chain_set().with_type(
            TypeDescription::new("Manager")
                .with_base("Employee")
                .with_member(Member::new("Level", MemberType::I32)),
        );
        let names: Vec<&str> = types
            .ancestors("Manager")
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Employee", "Person"]);
    }

    #[test]
    fn test_all_members_inherited_first() {
        let types = chain_set();
        let names: Vec<&str> = types
            .all_members("Employee")
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Id", "Name", "HireDate"]);
    }

    #[test]
    fn test_member_resolves_through_chain() {
        let types = chain_set();
        assert!(types.member("Employee", "Id").is_some());
        assert!(types.member("Employee", "HireDate").is_some());
        assert!(types.member("Person", "HireDate").is_none());
    }

    #[test]
    fn test_base_cycle_is_cut() {
        let types = TypeSet::new()
            .with_type(TypeDescription::new("A").with_base("B"))
            .with_type(TypeDescription::new("B").with_base("A"));
        // Must terminate; A's chain is just B
        let names: Vec<&str> = types.ancestors("A").iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B"]);
    }

    #[test]
    fn test_parse_yaml() {
        let types = TypeSet::from_yaml(
            r#"
types:
  - name: Person
    members:
      - name: Id
        type: i32
        key: true
      - name: Name
        type: string
  - name: Employee
    base: Person
    members:
      - name: HireDate
        type: date
      - name: Boss
        type: Employee
"#,
        )
        .unwrap();
        assert_eq!(types.types.len(), 2);
        let employee = types.get("Employee").unwrap();
        assert_eq!(employee.base.as_deref(), Some("Person"));
        assert_eq!(
            employee.member("Boss").unwrap().ty,
            MemberType::Reference("Employee".to_string())
        );
        assert!(types.get("Person").unwrap().member("Id").unwrap().key);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = TypeSet::from_yaml("not: [valid: yaml");
        assert!(result.is_err());
    }
}
