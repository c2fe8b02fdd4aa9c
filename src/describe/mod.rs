//! Type descriptions (nouns)
//!
//! The inbound surface of the crate: a statically declared description of each
//! host type (name, base-type link, own members with declared types and key
//! annotations), written in code or loaded from YAML.

mod member;
mod type_set;
mod types;

pub use member::Member;
pub use type_set::{TypeDescription, TypeSet};
pub use types::MemberType;
