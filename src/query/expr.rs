//! Filter expression trees

use super::clause::PropertyPath;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Comparison operators of the filter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOp::Eq => write!(f, "eq"),
            ComparisonOp::Ne => write!(f, "ne"),
            ComparisonOp::Gt => write!(f, "gt"),
            ComparisonOp::Ge => write!(f, "ge"),
            ComparisonOp::Lt => write!(f, "lt"),
            ComparisonOp::Le => write!(f, "le"),
        }
    }
}

/// Error when parsing a comparison operator keyword
#[derive(Debug, Clone)]
pub struct ParseComparisonOpError {
    pub input: String,
}

impl fmt::Display for ParseComparisonOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown comparison operator '{}'. Valid options: eq, ne, gt, ge, lt, le",
            self.input
        )
    }
}

impl std::error::Error for ParseComparisonOpError {}

impl FromStr for ComparisonOp {
    type Err = ParseComparisonOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(ComparisonOp::Eq),
            "ne" => Ok(ComparisonOp::Ne),
            "gt" => Ok(ComparisonOp::Gt),
            "ge" => Ok(ComparisonOp::Ge),
            "lt" => Ok(ComparisonOp::Lt),
            "le" => Ok(ComparisonOp::Le),
            _ => Err(ParseComparisonOpError {
                input: s.to_string(),
            }),
        }
    }
}

/// Literal values of the filter grammar
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Literal {
    /// The string payload, for string literals
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Literal::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Literal::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

/// A parsed filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Property path reference (exposed names)
    Property(PropertyPath),
    /// Literal value
    Literal(Literal),
    /// Comparison (e.g., hireDate gt 2000-01-01)
    Compare {
        left: Box<FilterExpr>,
        op: ComparisonOp,
        right: Box<FilterExpr>,
    },
    /// AND of two or more expressions
    And(Vec<FilterExpr>),
    /// OR of two or more expressions
    Or(Vec<FilterExpr>),
    /// Negation
    Not(Box<FilterExpr>),
}

impl FilterExpr {
    /// All property paths referenced anywhere in the expression
    pub fn property_paths(&self) -> Vec<&PropertyPath> {
        let mut paths = Vec::new();
        self.collect_paths(&mut paths);
        paths
    }

    fn collect_paths<'a>(&'a self, paths: &mut Vec<&'a PropertyPath>) {
        match self {
            FilterExpr::Property(path) => paths.push(path),
            FilterExpr::Literal(_) => {}
            FilterExpr::Compare { left, right, .. } => {
                left.collect_paths(paths);
                right.collect_paths(paths);
            }
            FilterExpr::And(items) | FilterExpr::Or(items) => {
                for item in items {
                    item.collect_paths(paths);
                }
            }
            FilterExpr::Not(inner) => inner.collect_paths(paths),
        }
    }
}
