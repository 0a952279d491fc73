//! This module defines the core data structures shared across the feeder.
//! It re-exports the field mapping, predicate, and bulk request types.

pub mod bulk_request;
pub mod field_mapping;
pub mod predicate;

pub use bulk_request::BulkRequestBody;
pub use field_mapping::{FieldMapping, FieldMappingEntry, MappingError};
pub use predicate::Predicate;
