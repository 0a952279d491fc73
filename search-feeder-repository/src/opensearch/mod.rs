//! OpenSearch implementation of the search sink.

mod sink;

pub use sink::OpenSearchSink;
