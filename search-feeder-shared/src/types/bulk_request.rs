//! Bulk request body assembled by the feeder and submitted to the sink.

use serde_json::{json, Value};

/// Ordered sequence of action/content line pairs for one bulk call.
///
/// For the document at position `i` of a chunk, the action descriptor sits at
/// line `2i` and carries the document identifier for addressing on write; its
/// content sits at line `2i + 1`. The pairing order is load-bearing for the
/// sink's bulk semantics and must never be reordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkRequestBody {
    lines: Vec<Value>,
}

impl BulkRequestBody {
    /// Create an empty request body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty request body sized for `documents` documents.
    pub fn with_capacity(documents: usize) -> Self {
        Self {
            lines: Vec::with_capacity(documents * 2),
        }
    }

    /// Append one document: an `index` action addressed by `id`, immediately
    /// followed by the extracted content.
    pub fn push_document(&mut self, id: Value, content: Value) {
        self.lines.push(json!({ "index": { "_id": id } }));
        self.lines.push(content);
    }

    /// The action/content lines in submission order.
    pub fn lines(&self) -> &[Value] {
        &self.lines
    }

    /// Total number of lines (always twice the document count).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of documents represented by this body.
    pub fn document_count(&self) -> usize {
        self.lines.len() / 2
    }

    /// Whether the body carries no documents.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
