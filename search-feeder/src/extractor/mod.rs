//! Field extractor: pulls mapped values out of one normalized document.
//!
//! Path expressions are compiled once at construction; a syntactically
//! invalid path is a startup error, not a per-document one.

use serde_json::{Map, Value};
use serde_json_path::JsonPath;
use tracing::warn;

use crate::errors::PipelineError;
use search_feeder_shared::FieldMapping;

struct CompiledField {
    name: String,
    raw_path: String,
    path: JsonPath,
}

/// Extractor over a validated, compiled field mapping.
pub struct FieldExtractor {
    fields: Vec<CompiledField>,
}

impl FieldExtractor {
    /// Validate the mapping and compile every path expression.
    pub fn new(mapping: &FieldMapping) -> Result<Self, PipelineError> {
        mapping
            .validate()
            .map_err(|e| PipelineError::invalid_mapping(e.to_string()))?;

        let mut fields = Vec::with_capacity(mapping.len());
        for entry in mapping.entries() {
            let path = JsonPath::parse(&entry.path).map_err(|e| {
                PipelineError::invalid_mapping(format!("field '{}': {}", entry.name, e))
            })?;
            fields.push(CompiledField {
                name: entry.name.clone(),
                raw_path: entry.path.clone(),
                path,
            });
        }

        Ok(Self { fields })
    }

    /// Extract mapped fields from one normalized document.
    ///
    /// A path resolving to exactly one location assigns the field. Zero or
    /// multiple matches emit one warning and omit the field — a malformed
    /// field never fails the document or the batch.
    pub fn extract(&self, document: &Value, document_id: &str) -> Map<String, Value> {
        let mut content = Map::with_capacity(self.fields.len());

        for field in &self.fields {
            let matches = field.path.query(document).all();
            match matches.as_slice() {
                [value] => {
                    content.insert(field.name.clone(), (*value).clone());
                }
                found => {
                    warn!(
                        field = %field.name,
                        path = %field.raw_path,
                        matches = found.len(),
                        document_id = %document_id,
                        "Path did not resolve to exactly one value, content ignored"
                    );
                }
            }
        }

        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_feeder_shared::FieldMappingEntry;
    use serde_json::json;

    fn mapping(entries: &[(&str, &str)]) -> FieldMapping {
        FieldMapping::new(
            entries
                .iter()
                .map(|(name, path)| FieldMappingEntry::new(*name, *path))
                .collect(),
        )
    }

    #[test]
    fn test_extracts_single_matches() {
        let extractor =
            FieldExtractor::new(&mapping(&[("id", "$.id"), ("text", "$.body.value")])).unwrap();
        let document = json!({ "id": "a1", "body": { "value": "hello" } });

        let content = extractor.extract(&document, "a1");

        assert_eq!(content.len(), 2);
        assert_eq!(content["id"], "a1");
        assert_eq!(content["text"], "hello");
    }

    #[test]
    fn test_zero_matches_omits_field() {
        let extractor =
            FieldExtractor::new(&mapping(&[("id", "$.id"), ("text", "$.body.value")])).unwrap();
        let document = json!({ "id": "a1" });

        let content = extractor.extract(&document, "a1");

        assert_eq!(content.len(), 1);
        assert!(content.contains_key("id"));
        assert!(!content.contains_key("text"));
    }

    #[test]
    fn test_multiple_matches_omits_field() {
        let extractor = FieldExtractor::new(&mapping(&[("tag", "$.tags[*]")])).unwrap();
        let document = json!({ "tags": ["a", "b"] });

        let content = extractor.extract(&document, "a1");

        assert!(content.is_empty());
    }

    #[test]
    fn test_extraction_preserves_non_string_values() {
        let extractor = FieldExtractor::new(&mapping(&[("revision", "$.meta.revision")])).unwrap();
        let document = json!({ "meta": { "revision": 7 } });

        let content = extractor.extract(&document, "a1");

        assert_eq!(content["revision"], 7);
    }

    #[test]
    fn test_invalid_path_fails_construction() {
        let result = FieldExtractor::new(&mapping(&[("id", "$[")]));
        assert!(matches!(result, Err(PipelineError::InvalidMapping(_))));
    }

    #[test]
    fn test_invalid_mapping_fails_construction() {
        let result = FieldExtractor::new(&FieldMapping::default());
        assert!(matches!(result, Err(PipelineError::InvalidMapping(_))));
    }
}
