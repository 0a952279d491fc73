//! Structured source query predicate.
//!
//! The feeder never evaluates free-form query strings. Callers describe the
//! source filter as a tree of comparison and logical operators; the source
//! collaborator translates it into its native query representation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A structured filter over source documents.
///
/// Serialized form uses the operator as the key, so a YAML config reads:
///
/// ```yaml
/// query:
///   and:
///     - eq: { field: status, value: published }
///     - gte: { field: revision, value: 3 }
/// ```
///
/// `query: all` matches every document and is the default when the config
/// omits the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Match every document.
    All,
    /// Field equals the given value.
    Eq { field: String, value: Value },
    /// Field does not equal the given value.
    Ne { field: String, value: Value },
    /// Field is greater than the given value.
    Gt { field: String, value: Value },
    /// Field is greater than or equal to the given value.
    Gte { field: String, value: Value },
    /// Field is less than the given value.
    Lt { field: String, value: Value },
    /// Field is less than or equal to the given value.
    Lte { field: String, value: Value },
    /// Field equals one of the given values.
    In { field: String, values: Vec<Value> },
    /// Field is present (or absent, with `exists: false`).
    Exists { field: String, exists: bool },
    /// Every sub-predicate matches.
    And(Vec<Predicate>),
    /// At least one sub-predicate matches.
    Or(Vec<Predicate>),
    /// The sub-predicate does not match.
    Not(Box<Predicate>),
}

impl Default for Predicate {
    fn default() -> Self {
        Self::All
    }
}
