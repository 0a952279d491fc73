//! Error types for the feeder pipeline.

use thiserror::Error;

use search_feeder_repository::{SinkError, SourceError};

/// Scalar encoding failures.
///
/// Raised when a store-specific value has no portable representation. The
/// encoder never guesses: an unsupported type fails loudly rather than
/// producing an incorrect string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A BSON type with no portable representation reached the encoder.
    #[error("unsupported BSON type {type_name} at '{path}'")]
    UnsupportedType {
        type_name: &'static str,
        path: String,
    },

    /// JSON numbers cannot carry NaN or infinities.
    #[error("non-finite number at '{path}'")]
    NonFiniteNumber { path: String },
}

impl EncodeError {
    /// Create an unsupported-type error for the element at `path`.
    pub fn unsupported(type_name: &'static str, path: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name,
            path: path.into(),
        }
    }

    /// Create a non-finite-number error for the element at `path`.
    pub fn non_finite(path: impl Into<String>) -> Self {
        Self::NonFiniteNumber { path: path.into() }
    }
}

/// Errors that terminate a pipeline run.
///
/// Per-field extraction mismatches are NOT here: they are recovered inside
/// the extractor (logged, field omitted) and never surface past it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An unsupported scalar reached the value encoder; the run aborts
    /// rather than silently dropping data.
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodeError),

    /// The source cursor or query failed.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The bulk publish call failed at the transport level.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// The index service reported item failures for a chunk. The batch is
    /// not retried; the failing chunk's effect on the index is
    /// indeterminate.
    #[error("Index service reported failures for chunk {0}; batch not retried")]
    PublishRejected(u64),

    /// The field mapping failed validation or path compilation.
    #[error("Invalid field mapping: {0}")]
    InvalidMapping(String),

    /// A document arrived without an `_id` to address it by.
    #[error("Document {0} in chunk has no '_id' field")]
    MissingIdentifier(usize),
}

impl PipelineError {
    /// Create a publish-rejected error for the given chunk ordinal.
    pub fn publish_rejected(chunk: u64) -> Self {
        Self::PublishRejected(chunk)
    }

    /// Create an invalid-mapping error.
    pub fn invalid_mapping(msg: impl Into<String>) -> Self {
        Self::InvalidMapping(msg.into())
    }

    /// Create a missing-identifier error for the document at the given
    /// 1-based position in its chunk.
    pub fn missing_identifier(ordinal: usize) -> Self {
        Self::MissingIdentifier(ordinal)
    }
}
