//! Error types for the feeder's external collaborators.
//!
//! This module provides one unified error type per collaborator side.

mod sink_error;
mod source_error;

pub use sink_error::SinkError;
pub use source_error::SourceError;
