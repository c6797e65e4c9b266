use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::data::CoreError;
use crate::traits::EmbeddingGenerator;

/// Embedding model served over HTTP (Ollama-compatible `/api/embeddings`).
#[derive(Debug, Clone)]
pub struct HttpEmbeddingService {
    client: Client,
    endpoint: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

impl HttpEmbeddingService {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingGenerator for HttpEmbeddingService {
    #[instrument(skip(self, text), fields(model = %self.model, text_length = text.len()))]
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, CoreError> {
        let url = format!("{}/api/embeddings", self.endpoint);
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::EmbeddingError(format!("Embedding request failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => {
                let body: EmbeddingResponse = response.json().await.map_err(|e| {
                    CoreError::EmbeddingError(format!("Failed to parse embedding response: {}", e))
                })?;
                debug!(dimension = body.embedding.len(), "Received embedding");
                Ok(body.embedding)
            }
            status => {
                let error_body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("HTTP error: {}", status));
                Err(CoreError::EmbeddingError(format!(
                    "Embedding model returned {}: {}",
                    status, error_body
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_test_service() -> (MockServer, HttpEmbeddingService) {
        let mock_server = MockServer::start().await;
        let service = HttpEmbeddingService::new(mock_server.uri(), "nomic-embed-text", Some(5))
            .expect("client builds");
        (mock_server, service)
    }

    #[tokio::test]
    async fn test_generate_embedding_success() {
        let (mock_server, service) = setup_test_service().await;

        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .and(body_json(json!({"model": "nomic-embed-text", "prompt": "weight loss"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "embedding": [0.25, -0.5, 1.0]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let embedding = service.generate_embedding("weight loss").await.unwrap();
        assert_eq!(embedding, vec![0.25, -0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_generate_embedding_server_error() {
        let (mock_server, service) = setup_test_service().await;

        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&mock_server)
            .await;

        let err = service.generate_embedding("weight loss").await.unwrap_err();
        assert!(err.is_encoding_failure());
        assert!(err.to_string().contains("model not loaded"), "got: {}", err);
    }

    #[tokio::test]
    async fn test_generate_embedding_malformed_body() {
        let (mock_server, service) = setup_test_service().await;

        Mock::given(method("POST"))
            .and(path("/api/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"vectors": []})))
            .mount(&mock_server)
            .await;

        let err = service.generate_embedding("muscle gain").await.unwrap_err();
        assert!(err.is_encoding_failure());
    }

    #[tokio::test]
    async fn test_unreachable_model_server() {
        let service = HttpEmbeddingService::new("http://127.0.0.1:9", "nomic-embed-text", Some(1))
            .expect("client builds");
        let err = service.generate_embedding("anything").await.unwrap_err();
        assert!(err.is_encoding_failure());
    }
}
