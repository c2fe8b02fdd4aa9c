//! Query parsing (verb module)
//!
//! Interprets a request URI against an assembled model: resolves the
//! addressing root (collection plus optional key segment) when the handle is
//! created, then parses the individual query options on demand, validating
//! every identifier against the target entity schema.

mod error;
mod filter;
mod path;

pub use error::QueryError;

use crate::builder::ModelBuilder;
use crate::model::{EntitySchema, Model, PropertyRef};
use crate::query::{FilterExpr, KeyValue, OrderByItem, PropertyPath};
use path::split_resource_segment;
use url::Url;

/// Placeholder base completing relative request URIs. A parsing anchor only;
/// it never appears in results and is never transmitted.
const PARSE_ANCHOR: &str = "http://localhost/";

/// Create a parser handle for `request_uri` against an assembled model
///
/// The URI may be relative (`/employees?$filter=...`) or absolute; its path
/// must contain at least one segment. The handle owns an independent model
/// snapshot.
pub fn create_parser(model: &Model, request_uri: &str) -> Result<QueryParser, QueryError> {
    QueryParser::new(model.clone(), request_uri)
}

/// Build from `builder` and create a parser handle, letting the URI
/// contribute schema information first
///
/// When the URI path has more than one segment, the last segment (stripped of
/// any key parenthetical) is registered as the collection name for
/// `type_name` before the model is built.
pub fn create_parser_for(
    builder: &mut ModelBuilder,
    type_name: &str,
    request_uri: &str,
) -> Result<QueryParser, QueryError> {
    let url = absolute(request_uri)?;
    let segments = path_segments(&url);
    if segments.len() > 1 {
        if let Some(last) = segments.last() {
            let resource = split_resource_segment(last);
            builder.set_collection_name(type_name, &resource.collection);
        }
    }
    let model = builder.build();
    QueryParser::new(model, request_uri)
}

/// A parser handle rooted at one collection of one model snapshot
#[derive(Debug, Clone)]
pub struct QueryParser {
    model: Model,
    target: usize,
    collection: String,
    service_root: String,
    key_text: Option<String>,
    options: Vec<(String, String)>,
}

impl QueryParser {
    fn new(model: Model, request_uri: &str) -> Result<Self, QueryError> {
        let url = absolute(request_uri)?;
        let segments = path_segments(&url);
        let Some(last) = segments.last() else {
            return Err(QueryError::InvalidArgument {
                parameter: "request_uri",
                reason: "URI path must contain at least one segment".to_string(),
            });
        };

        let resource = split_resource_segment(last);
        let target = model.collection_index(&resource.collection).ok_or_else(|| {
            QueryError::UnknownCollection {
                collection: resource.collection.clone(),
            }
        })?;

        let service_root = segments[..segments.len() - 1].join("/");
        let options = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            model,
            target,
            collection: resource.collection,
            service_root,
            key_text: resource.key,
            options,
        })
    }

    /// The model snapshot this handle interprets against
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The entity type rooting the addressed collection
    pub fn entity(&self) -> &EntitySchema {
        self.model.schema_at(self.target)
    }

    /// The addressed collection name
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Path segments preceding the resource segment, joined with `/`
    pub fn service_root(&self) -> &str {
        &self.service_root
    }

    /// Whether the resource segment carries a key parenthetical
    pub fn has_key(&self) -> bool {
        self.key_text.is_some()
    }

    /// The raw value of a query option, e.g. `$filter`
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The parsed `$filter` expression, if present
    pub fn filter(&self) -> Result<Option<FilterExpr>, QueryError> {
        let Some(text) = self.option("$filter") else {
            return Ok(None);
        };
        let expr = filter::parse_filter(text)?;
        for path in expr.property_paths() {
            self.resolve_path(path, false)?;
        }
        Ok(Some(expr))
    }

    /// The parsed `$orderby` clause chain; empty if absent
    pub fn orderby(&self) -> Result<Vec<OrderByItem>, QueryError> {
        let Some(text) = self.option("$orderby") else {
            return Ok(Vec::new());
        };
        let items = filter::parse_orderby(text)?;
        for item in &items {
            self.resolve_path(&item.property, false)?;
        }
        Ok(items)
    }

    /// The parsed `$select` path list; empty if absent
    pub fn select(&self) -> Result<Vec<PropertyPath>, QueryError> {
        let Some(text) = self.option("$select") else {
            return Ok(Vec::new());
        };
        let paths = filter::parse_paths(text)?;
        for p in &paths {
            self.resolve_path(p, false)?;
        }
        Ok(paths)
    }

    /// The parsed `$expand` path list; empty if absent.
    /// Every segment must be a navigation property.
    pub fn expand(&self) -> Result<Vec<PropertyPath>, QueryError> {
        let Some(text) = self.option("$expand") else {
            return Ok(Vec::new());
        };
        let paths = filter::parse_paths(text)?;
        for p in &paths {
            self.resolve_path(p, true)?;
        }
        Ok(paths)
    }

    /// The key components of the resource segment, in exposed-name form;
    /// empty when the URI addresses the whole collection
    ///
    /// A single unnamed literal binds to the entity's single effective key;
    /// named components bind by exposed key name.
    pub fn key_lookup(&self) -> Result<Vec<KeyValue>, QueryError> {
        let Some(text) = &self.key_text else {
            return Ok(Vec::new());
        };
        let components = filter::parse_key(text)?;
        let keys = self.model.effective_keys(self.entity());

        let mut resolved = Vec::with_capacity(components.len());
        for (name, value) in components {
            match name {
                Some(name) => {
                    let Some(key) = keys.iter().find(|k| k.exposed_name == name) else {
                        return Err(QueryError::UnknownProperty {
                            property: name,
                            entity: self.entity().name.clone(),
                        });
                    };
                    resolved.push(KeyValue {
                        name: key.exposed_name.clone(),
                        value,
                    });
                }
                None => {
                    // An unnamed literal is only unambiguous for a
                    // single-key entity.
                    let [key] = keys.as_slice() else {
                        return Err(QueryError::InvalidKey {
                            input: text.clone(),
                        });
                    };
                    resolved.push(KeyValue {
                        name: key.exposed_name.clone(),
                        value,
                    });
                }
            }
        }
        Ok(resolved)
    }

    /// Resolve a property path against the target entity, walking navigation
    /// targets segment by segment
    fn resolve_path(
        &self,
        path: &PropertyPath,
        require_navigation: bool,
    ) -> Result<(), QueryError> {
        let mut schema = self.entity();
        for (i, segment) in path.segments.iter().enumerate() {
            let is_last = i + 1 == path.segments.len();
            match self.model.property(schema, segment) {
                None => {
                    return Err(QueryError::UnknownProperty {
                        property: segment.clone(),
                        entity: schema.name.clone(),
                    })
                }
                Some(PropertyRef::Simple(_)) => {
                    if !is_last || require_navigation {
                        return Err(QueryError::NotANavigation {
                            property: segment.clone(),
                            entity: schema.name.clone(),
                        });
                    }
                }
                Some(PropertyRef::Navigation(nav)) => {
                    if !is_last {
                        schema = self.model.navigation_target(nav).ok_or_else(|| {
                            QueryError::UnknownProperty {
                                property: segment.clone(),
                                entity: schema.name.clone(),
                            }
                        })?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn absolute(request_uri: &str) -> Result<Url, QueryError> {
    match Url::parse(request_uri) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(PARSE_ANCHOR).map_err(|e| QueryError::InvalidArgument {
                parameter: "request_uri",
                reason: e.to_string(),
            })?;
            base.join(request_uri)
                .map_err(|e| QueryError::InvalidArgument {
                    parameter: "request_uri",
                    reason: e.to_string(),
                })
        }
        Err(e) => Err(QueryError::InvalidArgument {
            parameter: "request_uri",
            reason: e.to_string(),
        }),
    }
}

fn path_segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ModelBuilder, NamingPolicy};
    use crate::describe::{Member, MemberType, TypeDescription, TypeSet};

    fn directory_model() -> Model {
        let types = TypeSet::new()
            .with_type(
                TypeDescription::new("Person")
                    .with_member(Member::new("Id", MemberType::I32).as_key())
                    .with_member(Member::new("Name", MemberType::Text)),
            )
            .with_type(
                TypeDescription::new("Employee")
                    .with_base("Person")
                    .with_member(Member::new("HireDate", MemberType::Date))
                    .with_member(Member::new("Boss", MemberType::Reference("Employee".into()))),
            );
        let mut builder = ModelBuilder::with_naming(types, NamingPolicy::CamelCase);
        builder.add_entity("Person");
        builder.add_entity_with("Employee", None, Some("employees"));
        builder.build()
    }

    #[test]
    fn test_relative_and_absolute_uris_resolve() {
        let model = directory_model();
        assert!(create_parser(&model, "/employees").is_ok());
        assert!(create_parser(&model, "http://example.org/api/employees").is_ok());
    }

    #[test]
    fn test_empty_path_is_a_contract_error() {
        let model = directory_model();
        let err = create_parser(&model, "/").unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidArgument {
                parameter: "request_uri",
                ..
            }
        ));
    }

    #[test]
    fn test_service_root_is_everything_before_the_resource() {
        let model = directory_model();
        let parser = create_parser(&model, "/api/v1/employees").unwrap();
        assert_eq!(parser.service_root(), "api/v1");
        assert_eq!(parser.collection(), "employees");
    }

    #[test]
    fn test_filter_traverses_navigation_path() {
        let model = directory_model();
        let parser =
            create_parser(&model, "/employees?$filter=boss/name eq 'M'").unwrap();
        assert!(parser.filter().unwrap().is_some());
    }

    #[test]
    fn test_filter_through_simple_property_is_rejected() {
        let model = directory_model();
        let parser =
            create_parser(&model, "/employees?$filter=name/id eq 1").unwrap();
        assert!(matches!(
            parser.filter().unwrap_err(),
            QueryError::NotANavigation { .. }
        ));
    }

    #[test]
    fn test_expand_requires_navigation() {
        let model = directory_model();
        let parser = create_parser(&model, "/employees?$expand=boss").unwrap();
        assert_eq!(parser.expand().unwrap().len(), 1);

        let parser = create_parser(&model, "/employees?$expand=name").unwrap();
        assert!(matches!(
            parser.expand().unwrap_err(),
            QueryError::NotANavigation { .. }
        ));
    }

    #[test]
    fn test_named_key_components() {
        let model = directory_model();
        let parser = create_parser(&model, "/employees(id=7)").unwrap();
        let key = parser.key_lookup().unwrap();
        assert_eq!(key.len(), 1);
        assert_eq!(key[0].name, "id");
    }

    #[test]
    fn test_unknown_key_name_is_rejected() {
        let model = directory_model();
        let parser = create_parser(&model, "/employees(badge=7)").unwrap();
        assert!(matches!(
            parser.key_lookup().unwrap_err(),
            QueryError::UnknownProperty { .. }
        ));
    }
}
