//! File-based settings for one feeder run.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::Deserialize;

use crate::FeederError;
use search_feeder_shared::{FieldMapping, Predicate};

/// Settings loaded from the YAML configuration file.
///
/// ```yaml
/// chunk_size: 50
/// mongodb:
///   url: mongodb://localhost:27017
///   database: corpus
///   collection: articles
///   query:
///     eq: { field: status, value: published }
/// opensearch:
///   url: http://localhost:9200
///   username: admin
///   password: admin
///   index_name: articles
/// fields:
///   - name: id
///     path: $.id
///   - name: text
///     path: $.body.value
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Number of documents per bulk request.
    pub chunk_size: usize,
    pub mongodb: MongoSettings,
    pub opensearch: OpenSearchSettings,
    /// Ordered destination-field mapping.
    pub fields: FieldMapping,
}

/// Source document store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoSettings {
    pub url: String,
    pub database: String,
    pub collection: String,
    /// Structured source filter; matches every document when omitted.
    #[serde(default)]
    pub query: Predicate,
}

/// Index service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenSearchSettings {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub index_name: String,
}

impl Settings {
    /// Load and validate settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self, FeederError> {
        let text = fs::read_to_string(path).map_err(|e| {
            FeederError::config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let settings: Settings = serde_yaml::from_str(&text).map_err(|e| {
            FeederError::config(format!("invalid config file {}: {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), FeederError> {
        if self.chunk_size == 0 {
            return Err(FeederError::config("chunk_size must be at least 1"));
        }
        self.fields
            .validate()
            .map_err(|e| FeederError::config(e.to_string()))?;
        Ok(())
    }

    /// The chunk size as a non-zero count. Callers must have validated the
    /// settings first; an unvalidated zero falls back to 1.
    pub fn chunk_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.chunk_size).unwrap_or(NonZeroUsize::MIN)
    }
}
