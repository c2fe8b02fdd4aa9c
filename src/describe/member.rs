//! Member records within a type description

use super::types::MemberType;
use serde::{Deserialize, Serialize};

/// One declared instance member of a described type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Member {
    pub name: String,
    /// Declared type, in the `MemberType` string form
    #[serde(rename = "type")]
    pub ty: MemberType,
    /// Whether the member carries a "this is a key" annotation
    #[serde(default)]
    pub key: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: MemberType) -> Self {
        Self {
            name: name.into(),
            ty,
            key: false,
        }
    }

    /// Mark this member as key-annotated
    pub fn as_key(mut self) -> Self {
        self.key = true;
        self
    }
}
