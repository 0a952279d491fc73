//! Interface definitions for the feeder's external collaborators.
//!
//! This module defines the abstract `DocumentSource` and `SearchSink` traits
//! that allow for dependency injection and swappable backend implementations.

mod document_source;
mod search_sink;

pub use document_source::{DocumentSource, DocumentStream, RawDocument};
pub use search_sink::SearchSink;
