//! Ordering, selection, and key-lookup clause types

use super::expr::Literal;
use std::fmt;
use std::str::FromStr;

/// A slash-separated property path in exposed names (e.g., `boss/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    pub segments: Vec<String>,
}

impl PropertyPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// A single-segment path
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// The final segment
    pub fn last(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// Sort direction of an ordering clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// Error when parsing a sort direction keyword
#[derive(Debug, Clone)]
pub struct ParseSortDirectionError {
    pub input: String,
}

impl fmt::Display for ParseSortDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown sort direction '{}'. Valid options: asc, desc",
            self.input
        )
    }
}

impl std::error::Error for ParseSortDirectionError {}

impl FromStr for SortDirection {
    type Err = ParseSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(ParseSortDirectionError {
                input: s.to_string(),
            }),
        }
    }
}

/// One entry of an ordering clause chain
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    pub property: PropertyPath,
    pub direction: SortDirection,
}

/// One component of a key-lookup segment, in exposed-name form
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub name: String,
    pub value: Literal,
}
