//! Resource path handling
//!
//! The last URI path segment addresses the resource: a collection name with
//! an optional parenthesized key (`employees`, `employees('007')`). Segments
//! before it form the service root and carry no schema meaning here.

/// A split resource segment: collection name plus the raw key text, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResourceSegment {
    pub collection: String,
    /// The text between the key parentheses, unparsed
    pub key: Option<String>,
}

/// Split a path segment into collection name and raw key text
///
/// A segment without a well-formed parenthetical is all collection name;
/// the key text is validated later, against the grammar and the model.
pub(crate) fn split_resource_segment(segment: &str) -> ResourceSegment {
    if let Some(open) = segment.find('(') {
        if let Some(stripped) = segment[open..].strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            return ResourceSegment {
                collection: segment[..open].to_string(),
                key: Some(stripped.to_string()),
            };
        }
    }
    ResourceSegment {
        collection: segment.to_string(),
        key: None,
    }
}
