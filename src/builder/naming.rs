//! Naming policy: declared member name -> externally exposed name

/// The rule for converting a declared name into its exposed form
///
/// Applied uniformly to every exposed property name and to collection names
/// the builder derives automatically. The parser matches URI identifiers
/// against the stored exposed names, so the transform round-trips by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingPolicy {
    /// Identity transform
    Default,
    /// Lowercase the first character only; the remainder is untouched.
    /// Not a general camel-case algorithm, and idempotent.
    CamelCase,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        NamingPolicy::Default
    }
}

impl NamingPolicy {
    /// Apply the policy to a declared name
    pub fn apply(&self, name: &str) -> String {
        match self {
            NamingPolicy::Default => name.to_string(),
            NamingPolicy::CamelCase => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

/// Default collection name for a type: simple name lowercased and pluralized
pub(crate) fn default_collection_name(type_name: &str) -> String {
    format!("{}s", type_name.to_lowercase())
}
