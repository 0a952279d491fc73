//! OpenSearch sink implementation.
//!
//! This module provides the concrete implementation of `SearchSink` using
//! the OpenSearch Rust crate's bulk API.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SinkError;
use crate::interfaces::SearchSink;
use crate::types::BulkPublishOutcome;
use search_feeder_shared::BulkRequestBody;

/// OpenSearch sink implementation.
///
/// Submits bulk request bodies to a single-node OpenSearch (or
/// Elasticsearch-compatible) endpoint, passing static basic-auth credentials
/// through to the transport when configured.
pub struct OpenSearchSink {
    client: OpenSearch,
}

impl OpenSearchSink {
    /// Create a new sink connected to the given URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The index service URL (e.g., "http://localhost:9200")
    /// * `username` / `password` - Optional basic-auth credentials; both must
    ///   be present for auth to be configured
    pub fn new(
        url: &str,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, SinkError> {
        let parsed_url = Url::parse(url).map_err(|e| SinkError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let (Some(user), Some(pass)) = (username, password) {
            builder = builder.auth(Credentials::Basic(user.to_string(), pass.to_string()));
        }
        let transport = builder
            .build()
            .map_err(|e| SinkError::connection(e.to_string()))?;

        info!(url = %url, authenticated = username.is_some(), "Created OpenSearch sink");

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }
}

#[async_trait]
impl SearchSink for OpenSearchSink {
    async fn bulk_publish(
        &self,
        index: &str,
        body: &BulkRequestBody,
    ) -> Result<BulkPublishOutcome, SinkError> {
        let lines: Vec<JsonBody<Value>> =
            body.lines().iter().cloned().map(JsonBody::new).collect();

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(lines)
            .send()
            .await
            .map_err(|e| SinkError::bulk(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SinkError::bulk(format!(
                "Bulk publish failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SinkError::parse(e.to_string()))?;
        let outcome = parse_bulk_response(&response_body)?;

        debug!(
            index = %index,
            documents = body.document_count(),
            errors = outcome.errors,
            took_ms = ?outcome.took_ms,
            "Bulk response received"
        );

        Ok(outcome)
    }
}

/// Read the service-reported outcome out of a bulk response body.
fn parse_bulk_response(body: &Value) -> Result<BulkPublishOutcome, SinkError> {
    let errors = body
        .get("errors")
        .and_then(Value::as_bool)
        .ok_or_else(|| SinkError::parse("bulk response missing 'errors' flag"))?;
    let took_ms = body.get("took").and_then(Value::as_u64);

    Ok(BulkPublishOutcome { errors, took_ms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bulk_response_success() {
        let body = json!({ "took": 30, "errors": false, "items": [] });
        let outcome = parse_bulk_response(&body).unwrap();

        assert!(!outcome.errors);
        assert_eq!(outcome.took_ms, Some(30));
    }

    #[test]
    fn test_parse_bulk_response_with_item_failures() {
        let body = json!({ "took": 12, "errors": true, "items": [ { "index": { "status": 400 } } ] });
        let outcome = parse_bulk_response(&body).unwrap();

        assert!(outcome.errors);
    }

    #[test]
    fn test_parse_bulk_response_missing_flag() {
        let body = json!({ "took": 5 });
        let result = parse_bulk_response(&body);

        assert!(matches!(result, Err(SinkError::ParseError(_))));
    }

    #[test]
    fn test_parse_bulk_response_tolerates_missing_took() {
        let body = json!({ "errors": false });
        let outcome = parse_bulk_response(&body).unwrap();

        assert_eq!(outcome.took_ms, None);
    }
}
