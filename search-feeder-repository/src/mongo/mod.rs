//! MongoDB implementation of the document source.

mod source;

pub use source::{predicate_to_filter, MongoSource};
