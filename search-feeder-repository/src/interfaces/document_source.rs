//! Document source trait definition.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::SourceError;
use search_feeder_shared::Predicate;

/// A raw document as stored in the source collection.
///
/// An arbitrary tree of scalars, arrays, and nested documents, keyed by
/// `_id`, possibly carrying store-specific scalar types (native datetimes,
/// object ids, UUID binaries) that the pipeline encodes into portable form.
pub type RawDocument = bson::Document;

/// Lazy, single-pass sequence of raw documents produced by one query.
pub type DocumentStream = BoxStream<'static, Result<RawDocument, SourceError>>;

/// Abstracts the source document store.
///
/// The feeder core never inspects the predicate's meaning — it hands the
/// structured filter to the source and consumes whatever cursor comes back.
/// Implementations are injected at wiring time so the pipeline can be tested
/// against in-memory streams.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Run `predicate` against the store and return the matching documents
    /// as a lazy cursor-backed stream.
    ///
    /// The stream is single-pass: items are yielded in store order and the
    /// cursor cannot be rewound. A cursor failure mid-iteration surfaces as
    /// an `Err` item and is fatal to the run.
    async fn find(&self, predicate: &Predicate) -> Result<DocumentStream, SourceError>;
}
