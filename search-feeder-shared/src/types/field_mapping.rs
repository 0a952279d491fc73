//! Field mapping types for the feeder.
//!
//! A field mapping describes how values are pulled out of a source document:
//! each entry names a destination field and the path expression that locates
//! its value inside the normalized document tree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One destination field and the path expression that feeds it.
///
/// Both keys are required; a config file entry missing either one fails
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldMappingEntry {
    /// Destination field name in the indexed document.
    pub name: String,
    /// JSONPath expression evaluated against the normalized document.
    pub path: String,
}

impl FieldMappingEntry {
    /// Create a new mapping entry.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Ordered sequence of field mapping entries.
///
/// Order is preserved through extraction; destination names must be unique
/// within one mapping (see [`FieldMapping::validate`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: Vec<FieldMappingEntry>,
}

/// Structural validation failures of a field mapping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The mapping has no entries at all.
    #[error("field mapping has no entries")]
    Empty,

    /// Two entries share the same destination name.
    #[error("duplicate destination field '{0}' in mapping")]
    DuplicateName(String),

    /// An entry has an empty destination name.
    #[error("mapping entry has an empty destination field name")]
    EmptyName,

    /// An entry has an empty path expression.
    #[error("mapping entry '{0}' has an empty path expression")]
    EmptyPath(String),
}

impl FieldMapping {
    /// Create a mapping from an ordered list of entries.
    pub fn new(entries: Vec<FieldMappingEntry>) -> Self {
        Self { entries }
    }

    /// The entries in declaration order.
    pub fn entries(&self) -> &[FieldMappingEntry] {
        &self.entries
    }

    /// Number of entries in the mapping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate the structural shape of the mapping.
    ///
    /// Checks that the mapping is non-empty, that every entry has a
    /// non-empty name and path, and that destination names are unique.
    /// Semantic correctness of the path expressions is not checked here.
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.entries.is_empty() {
            return Err(MappingError::Empty);
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &self.entries {
            if entry.name.is_empty() {
                return Err(MappingError::EmptyName);
            }
            if entry.path.is_empty() {
                return Err(MappingError::EmptyPath(entry.name.clone()));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(MappingError::DuplicateName(entry.name.clone()));
            }
        }

        Ok(())
    }
}
