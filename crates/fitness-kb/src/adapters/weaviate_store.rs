use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::data::{
    entities::StoredRecord,
    errors::VectorStoreError,
    trace_context::TraceContext,
};
use crate::traits::VectorStore;

/// Default Weaviate endpoint.
pub const DEFAULT_WEAVIATE_URL: &str = "http://localhost:8085";

/// Configuration for the Weaviate client
#[derive(Debug, Clone)]
pub struct WeaviateConfig {
    /// Base URL of the Weaviate instance
    pub url: String,
    /// Optional timeout in seconds for HTTP requests
    pub timeout_secs: Option<u64>,
}

impl Default for WeaviateConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WEAVIATE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Vector store backed by Weaviate's REST and GraphQL API. No authentication.
#[derive(Debug, Clone)]
pub struct WeaviateStore {
    config: WeaviateConfig,
    client: Client,
}

/// Request payload for object creation
#[derive(Debug, Serialize)]
struct CreateObjectRequest<'a> {
    class: &'a str,
    properties: &'a StoredRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    vector: Option<&'a [f32]>,
}

#[derive(Debug, Serialize)]
struct GraphqlRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Class and property names are spliced into GraphQL text, so only plain
/// identifiers are accepted.
fn validate_identifier(kind: &str, name: &str) -> Result<(), VectorStoreError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(VectorStoreError::InvalidInput(format!("invalid {} name: {:?}", kind, name)))
    }
}

fn format_vector(vector: &[f32]) -> Result<String, VectorStoreError> {
    if let Some(bad) = vector.iter().find(|v| !v.is_finite()) {
        return Err(VectorStoreError::InvalidInput(format!(
            "query vector contains non-finite value {}",
            bad
        )));
    }
    let values: Vec<String> = vector.iter().map(|v| v.to_string()).collect();
    Ok(values.join(", "))
}

impl WeaviateStore {
    pub fn new(config: WeaviateConfig) -> Result<Self, VectorStoreError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| VectorStoreError::ConnectionError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: WeaviateConfig {
                url: config.url.trim_end_matches('/').to_string(),
                ..config
            },
            client,
        })
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, VectorStoreError> {
        Self::new(WeaviateConfig {
            url: url.into(),
            ..WeaviateConfig::default()
        })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn map_http_error(&self, error: reqwest::Error) -> VectorStoreError {
        if error.is_timeout() {
            VectorStoreError::ConnectionError(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            VectorStoreError::ConnectionError(format!("Connection error: {}", error))
        } else {
            VectorStoreError::Unknown(format!("HTTP error: {}", error))
        }
    }

    /// Runs a `Get` query and returns the object list for `collection`.
    async fn get_objects(&self, collection: &str, query: String) -> Result<Vec<StoredRecord>, VectorStoreError> {
        let url = format!("{}/v1/graphql", self.config.url);
        let response = self
            .client
            .post(&url)
            .json(&GraphqlRequest { query })
            .send()
            .await
            .map_err(|e| self.map_http_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| format!("HTTP error: {}", status));
            return Err(VectorStoreError::QueryError(format!("{}: {}", status, error_body)));
        }

        let body: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| VectorStoreError::MappingError(format!("Failed to parse response: {}", e)))?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(VectorStoreError::SchemaError(messages.join("; ")));
        }

        let objects = body
            .data
            .as_ref()
            .and_then(|data| data.get("Get"))
            .and_then(|get| get.get(collection))
            .cloned()
            .unwrap_or(Value::Null);

        match objects {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(map),
                    other => Err(VectorStoreError::MappingError(format!(
                        "expected object in result list, got {}",
                        other
                    ))),
                })
                .collect(),
            other => Err(VectorStoreError::MappingError(format!(
                "expected result list for {}, got {}",
                collection, other
            ))),
        }
    }
}

#[async_trait]
impl VectorStore for WeaviateStore {
    #[instrument(skip(self, properties, vector), fields(trace_id = %trace_ctx.trace_id))]
    async fn insert(
        &self,
        trace_ctx: &TraceContext,
        collection: &str,
        properties: StoredRecord,
        vector: Option<&[f32]>,
    ) -> Result<(), VectorStoreError> {
        validate_identifier("class", collection)?;
        let url = format!("{}/v1/objects", self.config.url);
        let request = CreateObjectRequest {
            class: collection,
            properties: &properties,
            vector,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_http_error(e))?;

        let status = response.status();
        if status.is_success() {
            debug!("Created object");
            return Ok(());
        }

        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| format!("HTTP error: {}", status));
        match status {
            StatusCode::UNPROCESSABLE_ENTITY => Err(VectorStoreError::SchemaError(error_body)),
            _ => Err(VectorStoreError::QueryError(format!("{}: {}", status, error_body))),
        }
    }

    #[instrument(skip(self, vector), fields(trace_id = %trace_ctx.trace_id, dimension = vector.len()))]
    async fn near_vector(
        &self,
        trace_ctx: &TraceContext,
        collection: &str,
        fields: &[&str],
        vector: &[f32],
        min_certainty: f32,
    ) -> Result<Vec<StoredRecord>, VectorStoreError> {
        validate_identifier("class", collection)?;
        if fields.is_empty() {
            return Err(VectorStoreError::InvalidInput("no fields requested".to_string()));
        }
        for field in fields {
            validate_identifier("property", field)?;
        }

        let query = format!(
            "{{ Get {{ {}(nearVector: {{vector: [{}], certainty: {}}}) {{ {} }} }} }}",
            collection,
            format_vector(vector)?,
            min_certainty,
            fields.join(" ")
        );

        let records = self.get_objects(collection, query).await?;
        debug!(matches = records.len(), "Near-vector query complete");
        Ok(records)
    }

    #[instrument(skip(self), fields(trace_id = %trace_ctx.trace_id))]
    async fn has_records(
        &self,
        trace_ctx: &TraceContext,
        collection: &str,
        field: &str,
    ) -> Result<bool, VectorStoreError> {
        validate_identifier("class", collection)?;
        validate_identifier("property", field)?;

        let query = format!("{{ Get {{ {}(limit: 1) {{ {} }} }} }}", collection, field);
        let records = self.get_objects(collection, query).await?;
        Ok(records.iter().any(|record| record.get(field).map_or(false, |v| !v.is_null())))
    }

    async fn health_check(&self) -> Result<bool, VectorStoreError> {
        let url = format!("{}/v1/.well-known/ready", self.config.url);
        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!("Weaviate readiness probe failed: {}", e);
                Err(self.map_http_error(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_validation() {
        assert!(validate_identifier("class", "Exercise").is_ok());
        assert!(validate_identifier("property", "_additional").is_ok());
        assert!(validate_identifier("class", "").is_err());
        assert!(validate_identifier("class", "1Exercise").is_err());
        assert!(validate_identifier("class", "Exercise) { secret }").is_err());
    }

    #[test]
    fn test_format_vector_rejects_nan() {
        assert_eq!(format_vector(&[0.5, -1.0]).unwrap(), "0.5, -1");
        assert!(matches!(
            format_vector(&[f32::NAN]),
            Err(VectorStoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let store = WeaviateStore::with_url("http://localhost:8085/").unwrap();
        assert_eq!(store.url(), "http://localhost:8085");
    }
}
