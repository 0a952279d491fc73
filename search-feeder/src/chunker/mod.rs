//! Chunker: slices an unbounded document stream into fixed-size groups.

use std::num::NonZeroUsize;

use futures::stream::BoxStream;
use futures::StreamExt;

/// Pull-based chunker over a fallible stream.
///
/// Never holds more than one chunk in memory. End of input is signalled by
/// `Ok(None)` rather than an error, so callers stop on a sentinel instead of
/// an exceptional control path.
pub struct Chunker<T, E> {
    stream: BoxStream<'static, Result<T, E>>,
    size: NonZeroUsize,
    exhausted: bool,
}

impl<T, E> Chunker<T, E> {
    /// Create a chunker producing groups of at most `size` items.
    pub fn new(stream: BoxStream<'static, Result<T, E>>, size: NonZeroUsize) -> Self {
        Self {
            stream,
            size,
            exhausted: false,
        }
    }

    /// Pull the next chunk off the stream.
    ///
    /// Returns `Ok(Some(chunk))` with between 1 and `size` items, or
    /// `Ok(None)` once the input is exhausted. The end marker is sticky:
    /// every later call returns `Ok(None)` again. Single-pass — the
    /// underlying stream cannot be rewound.
    ///
    /// A stream error is returned immediately and also marks the chunker
    /// exhausted; items pulled before the error are dropped.
    pub async fn next_chunk(&mut self) -> Result<Option<Vec<T>>, E> {
        if self.exhausted {
            return Ok(None);
        }

        let mut chunk = Vec::with_capacity(self.size.get());
        while chunk.len() < self.size.get() {
            match self.stream.next().await {
                Some(Ok(item)) => chunk.push(item),
                Some(Err(error)) => {
                    self.exhausted = true;
                    return Err(error);
                }
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        if chunk.is_empty() {
            Ok(None)
        } else {
            Ok(Some(chunk))
        }
    }
}
