//! Document source error types.

use thiserror::Error;

/// Unified errors from document source operations.
///
/// Used by the `DocumentSource` trait for connection setup, query execution,
/// and cursor iteration. Any of these is fatal to a feeder run.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Failed to establish a connection to the document store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The store rejected the query.
    #[error("Query error: {0}")]
    QueryError(String),

    /// The result cursor failed mid-iteration.
    #[error("Cursor error: {0}")]
    CursorError(String),

    /// The structured predicate could not be translated for this store.
    #[error("Predicate error: {0}")]
    PredicateError(String),
}

impl SourceError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a cursor error.
    pub fn cursor(msg: impl Into<String>) -> Self {
        Self::CursorError(msg.into())
    }

    /// Create a predicate translation error.
    pub fn predicate(msg: impl Into<String>) -> Self {
        Self::PredicateError(msg.into())
    }
}
