//! Query parser error types

use std::fmt;

/// Errors raised while interpreting a request URI against a model
#[derive(Debug)]
pub enum QueryError {
    /// Caller contract violation at the factory boundary
    InvalidArgument {
        parameter: &'static str,
        reason: String,
    },
    /// The URI addresses a collection the model does not contain
    UnknownCollection { collection: String },
    /// An identifier does not resolve against the entity schema
    UnknownProperty { property: String, entity: String },
    /// A path segment that must be a navigation property is not one
    NotANavigation { property: String, entity: String },
    /// `$filter` text that does not match the grammar
    InvalidFilter { input: String },
    /// `$orderby` text that does not match the grammar
    InvalidOrderBy { input: String },
    /// `$select` / `$expand` text that does not match the grammar
    InvalidSelect { input: String },
    /// A key segment that does not match the grammar
    InvalidKey { input: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { parameter, reason } => {
                write!(f, "Invalid argument '{}': {}", parameter, reason)
            }
            Self::UnknownCollection { collection } => {
                write!(f, "Collection '{}' not found in model", collection)
            }
            Self::UnknownProperty { property, entity } => {
                write!(f, "Property '{}' not found on entity '{}'", property, entity)
            }
            Self::NotANavigation { property, entity } => {
                write!(
                    f,
                    "Property '{}' on entity '{}' is not a navigation property",
                    property, entity
                )
            }
            Self::InvalidFilter { input } => {
                write!(f, "Invalid $filter expression '{}'", input)
            }
            Self::InvalidOrderBy { input } => {
                write!(f, "Invalid $orderby clause '{}'", input)
            }
            Self::InvalidSelect { input } => {
                write!(f, "Invalid selection path list '{}'", input)
            }
            Self::InvalidKey { input } => {
                write!(f, "Invalid key segment '{}'", input)
            }
        }
    }
}

impl std::error::Error for QueryError {}
