//! # Search Feeder Repository
//!
//! This crate provides the external collaborators of the feeder pipeline:
//! the abstract `DocumentSource` and `SearchSink` traits, a MongoDB-backed
//! source implementation, and an OpenSearch-backed sink implementation.
//!
//! The core pipeline only ever talks to the traits; concrete backends are
//! injected at wiring time, which keeps the pipeline testable with mocks.

pub mod errors;
pub mod interfaces;
pub mod mongo;
pub mod opensearch;
pub mod types;

pub use errors::{SinkError, SourceError};
pub use interfaces::{DocumentSource, DocumentStream, RawDocument, SearchSink};
pub use mongo::MongoSource;
pub use opensearch::OpenSearchSink;
pub use types::BulkPublishOutcome;
