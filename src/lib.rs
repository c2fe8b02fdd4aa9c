//! edmquery - Build queryable entity data models and parse REST-style query
//! URIs against them
//!
//! This library provides:
//! - Type-description types (TypeSet, TypeDescription, Member, MemberType)
//! - Description parsing from YAML
//! - Model building (inheritance resolution, key inference, property
//!   classification, naming policy)
//! - Query parsing against the assembled model (filter expressions,
//!   ordering clauses, selection paths, key lookup)
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `describe/` - supplied type descriptions (TypeSet, TypeDescription,
//!   Member, MemberType)
//! - `model/` - assembled model (Model, EntitySchema, Property,
//!   NavigationProperty)
//! - `query/` - parsed query clauses (FilterExpr, OrderByItem, PropertyPath,
//!   KeyValue)
//!
//! **Verb modules** (transformations):
//! - `builder/` - TypeSet + registrations -> Model
//! - `parser/` - Model + request URI -> parsed clauses
//!
//! # Example
//!
//! ```ignore
//! use edmquery::{create_parser, ModelBuilder, NamingPolicy, TypeSet};
//!
//! let types = TypeSet::from_file("types.yaml")?;
//! let mut builder = ModelBuilder::with_naming(types, NamingPolicy::CamelCase);
//! builder.add_entity_with("Employee", Some("Id"), Some("employees"));
//! let model = builder.build();
//! let parser = create_parser(&model, "/employees?$filter=hireDate gt 2000-01-01")?;
//! let filter = parser.filter()?;
//! ```

pub mod builder;
pub mod describe;
pub mod error;
pub mod model;
pub mod parser;
pub mod query;

// Re-export commonly used types
pub use builder::{EntityConfig, ModelBuilder, NamingPolicy};
pub use describe::{Member, MemberType, TypeDescription, TypeSet};
pub use error::ParseError;
pub use model::{EntitySchema, Model, NavigationProperty, Property, PropertyRef};
pub use parser::{create_parser, create_parser_for, QueryError, QueryParser};
pub use query::{
    ComparisonOp, FilterExpr, KeyValue, Literal, OrderByItem, PropertyPath, SortDirection,
};
