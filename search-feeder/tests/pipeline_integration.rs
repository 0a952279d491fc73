//! Integration tests for the feeder pipeline.
//!
//! These tests use the real driver, chunker, and batch builder but mock the
//! sink (and feed the chunker from in-memory streams) to ensure reliable
//! testing without live collaborators.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bson::doc;
use futures::StreamExt;
use serde_json::json;

use search_feeder::batcher::BatchBuilder;
use search_feeder::chunker::Chunker;
use search_feeder::errors::PipelineError;
use search_feeder::extractor::FieldExtractor;
use search_feeder::pipeline::{PipelineDriver, PipelineState};
use search_feeder::progress::ProgressObserver;
use search_feeder_repository::{
    BulkPublishOutcome, RawDocument, SearchSink, SinkError, SourceError,
};
use search_feeder_shared::{BulkRequestBody, FieldMapping, FieldMappingEntry};

// Mock sink recording every bulk call.
struct MockSink {
    calls: Mutex<Vec<(String, BulkRequestBody)>>,
    // 1-based call ordinal that reports `errors: true`.
    fail_on_call: Option<usize>,
}

impl MockSink {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
        }
    }

    fn failing_on(call: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on_call: Some(call),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn batch_sizes(&self) -> Vec<usize> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.document_count())
            .collect()
    }
}

#[async_trait]
impl SearchSink for MockSink {
    async fn bulk_publish(
        &self,
        index: &str,
        body: &BulkRequestBody,
    ) -> Result<BulkPublishOutcome, SinkError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((index.to_string(), body.clone()));
        let errors = self.fail_on_call == Some(calls.len());

        Ok(BulkPublishOutcome {
            errors,
            took_ms: Some(3),
        })
    }
}

// Observer recording chunk-level callbacks.
struct RecordingObserver {
    chunks: Mutex<Vec<(u64, usize, bool)>>,
}

impl RecordingObserver {
    fn new() -> Self {
        Self {
            chunks: Mutex::new(Vec::new()),
        }
    }
}

impl ProgressObserver for RecordingObserver {
    fn document_added(&self, _ordinal: usize, _document_id: &str) {}

    fn chunk_published(&self, ordinal: u64, documents: usize, success: bool) {
        self.chunks.lock().unwrap().push((ordinal, documents, success));
    }
}

fn sample_documents(count: usize) -> Vec<RawDocument> {
    (0..count)
        .map(|i| {
            doc! {
                "_id": format!("doc-{:04}", i),
                "id": format!("doc-{:04}", i),
                "body": { "value": format!("text {}", i) },
            }
        })
        .collect()
}

fn chunker_over(documents: Vec<RawDocument>, size: usize) -> Chunker<RawDocument, SourceError> {
    let stream = futures::stream::iter(documents.into_iter().map(Ok)).boxed();
    Chunker::new(stream, NonZeroUsize::new(size).unwrap())
}

fn batcher() -> BatchBuilder {
    let mapping = FieldMapping::new(vec![
        FieldMappingEntry::new("id", "$.id"),
        FieldMappingEntry::new("text", "$.body.value"),
    ]);
    BatchBuilder::new(FieldExtractor::new(&mapping).unwrap())
}

#[tokio::test]
async fn test_125_documents_make_three_chunked_publishes() {
    let sink = Arc::new(MockSink::new());
    let driver = PipelineDriver::new(
        chunker_over(sample_documents(125), 50),
        batcher(),
        sink.clone(),
        "articles",
    );
    assert_eq!(driver.state(), PipelineState::Idle);

    let report = driver.run().await.unwrap();

    assert_eq!(report.documents, 125);
    assert_eq!(report.chunks, 3);
    assert_eq!(sink.batch_sizes(), vec![50, 50, 25]);

    let calls = sink.calls.lock().unwrap();
    assert!(calls.iter().all(|(index, _)| index == "articles"));
    // Pairing order inside each published body.
    let (_, first_body) = &calls[0];
    assert_eq!(first_body.line_count(), 100);
    assert_eq!(
        first_body.lines()[0],
        json!({ "index": { "_id": "doc-0000" } })
    );
    assert_eq!(
        first_body.lines()[1],
        json!({ "id": "doc-0000", "text": "text 0" })
    );
}

#[tokio::test]
async fn test_document_missing_mapped_path_still_completes() {
    let mut documents = sample_documents(3);
    documents[1] = doc! { "_id": "doc-0001", "id": "doc-0001" };

    let sink = Arc::new(MockSink::new());
    let driver = PipelineDriver::new(chunker_over(documents, 50), batcher(), sink.clone(), "articles");

    let report = driver.run().await.unwrap();

    assert_eq!(report.documents, 3);
    let calls = sink.calls.lock().unwrap();
    let (_, body) = &calls[0];
    // The malformed document keeps its remaining field only.
    assert_eq!(body.lines()[3], json!({ "id": "doc-0001" }));
}

#[tokio::test]
async fn test_sink_error_flag_on_second_chunk_aborts_run() {
    let sink = Arc::new(MockSink::failing_on(2));
    let observer = Arc::new(RecordingObserver::new());
    let driver = PipelineDriver::with_observer(
        chunker_over(sample_documents(125), 50),
        batcher(),
        sink.clone(),
        "articles",
        observer.clone(),
    );

    let result = driver.run().await;

    // Abort policy: the failing chunk is logged, never retried, and the
    // third chunk is never attempted.
    assert!(matches!(result, Err(PipelineError::PublishRejected(2))));
    assert_eq!(sink.call_count(), 2);

    let chunks = observer.chunks.lock().unwrap();
    assert_eq!(*chunks, vec![(1, 50, true), (2, 50, false)]);
}

#[tokio::test]
async fn test_empty_input_finishes_cleanly() {
    let sink = Arc::new(MockSink::new());
    let driver = PipelineDriver::new(chunker_over(Vec::new(), 50), batcher(), sink.clone(), "articles");

    let report = driver.run().await.unwrap();

    assert_eq!(report.documents, 0);
    assert_eq!(report.chunks, 0);
    assert_eq!(sink.call_count(), 0);
}

#[tokio::test]
async fn test_cursor_failure_aborts_run() {
    let stream = futures::stream::iter(vec![
        Ok(doc! { "_id": "a1", "id": "a1", "body": { "value": "x" } }),
        Err(SourceError::cursor("connection reset")),
    ])
    .boxed();
    let chunker = Chunker::new(stream, NonZeroUsize::new(50).unwrap());

    let sink = Arc::new(MockSink::new());
    let driver = PipelineDriver::new(chunker, batcher(), sink.clone(), "articles");

    let result = driver.run().await;

    assert!(matches!(result, Err(PipelineError::Source(_))));
    assert_eq!(sink.call_count(), 0);
}

#[tokio::test]
async fn test_unsupported_scalar_aborts_run() {
    let documents = vec![doc! { "_id": "a1", "odd": bson::Bson::MinKey }];
    let sink = Arc::new(MockSink::new());
    let driver = PipelineDriver::new(chunker_over(documents, 50), batcher(), sink.clone(), "articles");

    let result = driver.run().await;

    assert!(matches!(result, Err(PipelineError::Encoding(_))));
    assert_eq!(sink.call_count(), 0);
}
