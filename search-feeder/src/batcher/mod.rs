//! Batch builder: turns one chunk of raw documents into a bulk request body.

use serde_json::Value;

use crate::encoder::encode_document;
use crate::errors::PipelineError;
use crate::extractor::FieldExtractor;
use crate::progress::ProgressObserver;
use search_feeder_repository::RawDocument;
use search_feeder_shared::BulkRequestBody;

/// Builds bulk request bodies from chunks, one document at a time.
pub struct BatchBuilder {
    extractor: FieldExtractor,
}

impl BatchBuilder {
    /// Create a builder over a compiled extractor.
    pub fn new(extractor: FieldExtractor) -> Self {
        Self { extractor }
    }

    /// Build the request body for one chunk, in arrival order.
    ///
    /// Each document is encoded, its mapped fields extracted, and an action
    /// descriptor carrying the encoded `_id` appended immediately before its
    /// content. Returns the document count alongside the body.
    pub fn build(
        &self,
        chunk: &[RawDocument],
        observer: &dyn ProgressObserver,
    ) -> Result<(usize, BulkRequestBody), PipelineError> {
        let mut body = BulkRequestBody::with_capacity(chunk.len());

        for (index, document) in chunk.iter().enumerate() {
            let encoded = encode_document(document)?;
            let id = encoded
                .get("_id")
                .cloned()
                .ok_or_else(|| PipelineError::missing_identifier(index + 1))?;
            let label = display_id(&id);

            let content = self.extractor.extract(&encoded, &label);
            body.push_document(id, Value::Object(content));

            observer.document_added(index + 1, &label);
        }

        Ok((chunk.len(), body))
    }
}

/// Human-readable form of a document identifier for logs.
fn display_id(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, Bson};
    use search_feeder_shared::{FieldMapping, FieldMappingEntry};
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingObserver {
        documents: Mutex<Vec<(usize, String)>>,
    }

    impl RecordingObserver {
        fn new() -> Self {
            Self {
                documents: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProgressObserver for RecordingObserver {
        fn document_added(&self, ordinal: usize, document_id: &str) {
            self.documents
                .lock()
                .unwrap()
                .push((ordinal, document_id.to_string()));
        }

        fn chunk_published(&self, _ordinal: u64, _documents: usize, _success: bool) {}
    }

    fn builder() -> BatchBuilder {
        let mapping = FieldMapping::new(vec![
            FieldMappingEntry::new("id", "$.id"),
            FieldMappingEntry::new("text", "$.body.value"),
        ]);
        BatchBuilder::new(FieldExtractor::new(&mapping).unwrap())
    }

    #[test]
    fn test_pairs_action_and_content_in_order() {
        let chunk = vec![
            doc! { "_id": "a1", "id": "a1", "body": { "value": "first" } },
            doc! { "_id": "a2", "id": "a2", "body": { "value": "second" } },
        ];
        let observer = RecordingObserver::new();

        let (count, body) = builder().build(&chunk, &observer).unwrap();

        assert_eq!(count, 2);
        assert_eq!(body.line_count(), 4);
        assert_eq!(body.lines()[0], json!({ "index": { "_id": "a1" } }));
        assert_eq!(body.lines()[1], json!({ "id": "a1", "text": "first" }));
        assert_eq!(body.lines()[2], json!({ "index": { "_id": "a2" } }));
        assert_eq!(body.lines()[3], json!({ "id": "a2", "text": "second" }));
    }

    #[test]
    fn test_observer_sees_one_based_ordinals() {
        let chunk = vec![
            doc! { "_id": "a1", "id": "a1", "body": { "value": "x" } },
            doc! { "_id": "a2", "id": "a2", "body": { "value": "y" } },
        ];
        let observer = RecordingObserver::new();

        builder().build(&chunk, &observer).unwrap();

        let seen = observer.documents.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(1, "a1".to_string()), (2, "a2".to_string())]
        );
    }

    #[test]
    fn test_missing_mapped_field_is_omitted_not_fatal() {
        let chunk = vec![doc! { "_id": "a1", "id": "a1" }];
        let observer = RecordingObserver::new();

        let (count, body) = builder().build(&chunk, &observer).unwrap();

        assert_eq!(count, 1);
        assert_eq!(body.lines()[1], json!({ "id": "a1" }));
    }

    #[test]
    fn test_object_id_addressing_uses_encoded_hex() {
        let id = bson::oid::ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let chunk = vec![doc! { "_id": id, "id": "a1", "body": { "value": "x" } }];
        let observer = RecordingObserver::new();

        let (_, body) = builder().build(&chunk, &observer).unwrap();

        assert_eq!(
            body.lines()[0],
            json!({ "index": { "_id": "507f1f77bcf86cd799439011" } })
        );
    }

    #[test]
    fn test_document_without_id_fails() {
        let chunk = vec![doc! { "id": "a1" }];
        let observer = RecordingObserver::new();

        let result = builder().build(&chunk, &observer);

        assert!(matches!(
            result,
            Err(PipelineError::MissingIdentifier(1))
        ));
    }

    #[test]
    fn test_unsupported_type_aborts_batch() {
        let chunk = vec![doc! { "_id": "a1", "odd": Bson::MaxKey }];
        let observer = RecordingObserver::new();

        let result = builder().build(&chunk, &observer);

        assert!(matches!(result, Err(PipelineError::Encoding(_))));
    }
}
