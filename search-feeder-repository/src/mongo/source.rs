//! MongoDB-backed document source.
//!
//! Translates the structured predicate into a native filter document and
//! exposes the driver cursor as a `DocumentStream`.

use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::SourceError;
use crate::interfaces::{DocumentSource, DocumentStream};
use search_feeder_shared::Predicate;

/// MongoDB document source over one collection.
pub struct MongoSource {
    collection: Collection<Document>,
}

impl MongoSource {
    /// Connect to the store and bind to `database`/`collection`.
    ///
    /// # Arguments
    ///
    /// * `url` - MongoDB connection string (e.g., "mongodb://localhost:27017")
    /// * `database` - Database name
    /// * `collection` - Collection name
    pub async fn connect(
        url: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, SourceError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| SourceError::connection(e.to_string()))?;
        let collection = client.database(database).collection::<Document>(collection);

        info!(
            database = %database,
            collection = %collection.name(),
            "Connected to MongoDB"
        );

        Ok(Self { collection })
    }
}

#[async_trait]
impl DocumentSource for MongoSource {
    async fn find(&self, predicate: &Predicate) -> Result<DocumentStream, SourceError> {
        let filter = predicate_to_filter(predicate)?;
        debug!(filter = %filter, "Running source query");

        let cursor = self
            .collection
            .find(filter, None)
            .await
            .map_err(|e| SourceError::query(e.to_string()))?;

        Ok(cursor
            .map(|item| item.map_err(|e| SourceError::cursor(e.to_string())))
            .boxed())
    }
}

/// Translate a structured predicate into a MongoDB filter document.
///
/// `All` becomes the empty filter. Logical operators map to `$and`/`$or`;
/// negation uses a single-element `$nor`, which negates arbitrary
/// sub-filters (a bare `$not` only applies to operator expressions).
pub fn predicate_to_filter(predicate: &Predicate) -> Result<Document, SourceError> {
    match predicate {
        Predicate::All => Ok(Document::new()),
        Predicate::Eq { field, value } => {
            let mut filter = Document::new();
            filter.insert(field.as_str(), json_to_bson(value)?);
            Ok(filter)
        }
        Predicate::Ne { field, value } => comparison("$ne", field, value),
        Predicate::Gt { field, value } => comparison("$gt", field, value),
        Predicate::Gte { field, value } => comparison("$gte", field, value),
        Predicate::Lt { field, value } => comparison("$lt", field, value),
        Predicate::Lte { field, value } => comparison("$lte", field, value),
        Predicate::In { field, values } => {
            let items = values
                .iter()
                .map(json_to_bson)
                .collect::<Result<Vec<Bson>, SourceError>>()?;
            let mut filter = Document::new();
            filter.insert(field.as_str(), doc! { "$in": items });
            Ok(filter)
        }
        Predicate::Exists { field, exists } => {
            let mut filter = Document::new();
            filter.insert(field.as_str(), doc! { "$exists": *exists });
            Ok(filter)
        }
        Predicate::And(predicates) => logical("$and", predicates),
        Predicate::Or(predicates) => logical("$or", predicates),
        Predicate::Not(inner) => {
            let inner = predicate_to_filter(inner)?;
            Ok(doc! { "$nor": [inner] })
        }
    }
}

fn comparison(operator: &str, field: &str, value: &Value) -> Result<Document, SourceError> {
    let mut condition = Document::new();
    condition.insert(operator, json_to_bson(value)?);
    let mut filter = Document::new();
    filter.insert(field, condition);
    Ok(filter)
}

fn logical(operator: &str, predicates: &[Predicate]) -> Result<Document, SourceError> {
    let filters = predicates
        .iter()
        .map(predicate_to_filter)
        .collect::<Result<Vec<Document>, SourceError>>()?;
    let mut filter = Document::new();
    filter.insert(operator, filters);
    Ok(filter)
}

fn json_to_bson(value: &Value) -> Result<Bson, SourceError> {
    to_bson(value).map_err(|e| SourceError::predicate(e.to_string()))
}
