//! # Search Feeder Shared
//!
//! This crate defines shared data structures and types used across the search
//! feeder system: the declarative field mapping, the structured source query
//! predicate, and the bulk request body handed to the index service.

pub mod types;

pub use types::bulk_request::BulkRequestBody;
pub use types::field_mapping::{FieldMapping, FieldMappingEntry, MappingError};
pub use types::predicate::Predicate;
