//! Declared-type descriptors for type-description members

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The declared type of a member, as reported by a type description
///
/// Scalar keywords are lowercase (`i32`, `date`, `string`, ...); any other
/// string names a reference type. A reference classifies as a navigation
/// property when its target is a modeled entity, so an entity type may safely
/// be named `Date` or `String` without colliding with the scalar keywords.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberType {
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
    /// Fixed-point decimal
    Decimal,
    /// Boolean
    Bool,
    /// Variable-length text
    Text,
    /// Date (no time component)
    Date,
    /// Date and time
    Timestamp,
    /// Globally unique identifier
    Guid,
    /// Sequence-valued member, element type irrelevant
    Array,
    /// Enumeration-valued member
    Enum,
    /// Named reference to another described type
    Reference(String),
}

impl Default for MemberType {
    fn default() -> Self {
        MemberType::Text
    }
}

impl MemberType {
    /// True for scalar-like types (numeric, date/time, boolean, text)
    pub fn is_simple(&self) -> bool {
        !matches!(
            self,
            MemberType::Array | MemberType::Enum | MemberType::Reference(_)
        )
    }

    /// The referenced type name, for reference members
    pub fn reference(&self) -> Option<&str> {
        match self {
            MemberType::Reference(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberType::I32 => write!(f, "i32"),
            MemberType::I64 => write!(f, "i64"),
            MemberType::F32 => write!(f, "f32"),
            MemberType::F64 => write!(f, "f64"),
            MemberType::Decimal => write!(f, "decimal"),
            MemberType::Bool => write!(f, "bool"),
            MemberType::Text => write!(f, "string"),
            MemberType::Date => write!(f, "date"),
            MemberType::Timestamp => write!(f, "timestamp"),
            MemberType::Guid => write!(f, "guid"),
            MemberType::Array => write!(f, "array"),
            MemberType::Enum => write!(f, "enum"),
            MemberType::Reference(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for MemberType {
    fn from(s: &str) -> Self {
        // Keyword matching is case-sensitive: `Date` names a reference type,
        // `date` names the scalar.
        match s {
            "i32" | "int" | "integer" => MemberType::I32,
            "i64" | "long" | "bigint" => MemberType::I64,
            "f32" | "float" => MemberType::F32,
            "f64" | "double" => MemberType::F64,
            "decimal" => MemberType::Decimal,
            "bool" | "boolean" => MemberType::Bool,
            "string" | "text" | "varchar" => MemberType::Text,
            "date" => MemberType::Date,
            "timestamp" | "datetime" => MemberType::Timestamp,
            "guid" | "uuid" => MemberType::Guid,
            "array" | "list" => MemberType::Array,
            "enum" => MemberType::Enum,
            other => MemberType::Reference(other.to_string()),
        }
    }
}

impl FromStr for MemberType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MemberType::from(s))
    }
}

// Custom deserialize from string
impl<'de> Deserialize<'de> for MemberType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(MemberType::from(s.as_str()))
    }
}

// Serialize back to string
impl Serialize for MemberType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
