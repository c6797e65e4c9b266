use async_trait::async_trait;
use std::sync::Arc;

use crate::data::CoreError;
use crate::traits::EmbeddingGenerator;

#[cfg(feature = "adapters")]
mod http;

#[cfg(feature = "adapters")]
pub use http::HttpEmbeddingService;

/// Default embedding model served by the model server.
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Default model server endpoint.
pub const DEFAULT_EMBEDDING_URL: &str = "http://localhost:11434";

/// Keyword groups that pull related goals and exercises together in mock embeddings.
const KEYWORD_GROUPS: [&[&str]; 4] = [
    &["cardio", "endurance", "jog", "run", "walk", "weight loss", "stamina"],
    &["upper", "push", "chest", "arm", "shoulder"],
    &["lower", "squat", "leg", "glute"],
    &["strength", "muscle", "gain", "build", "tone"],
];

/// Deterministic embedding service for development and tests.
/// Used when no model server is available.
#[derive(Debug, Clone)]
pub struct MockEmbeddingService {
    embedding_dimension: usize,
}

impl MockEmbeddingService {
    pub fn new(embedding_dimension: usize) -> Self {
        Self {
            embedding_dimension: embedding_dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.embedding_dimension
    }

    fn generate_deterministic_embedding(&self, text: &str) -> Vec<f32> {
        let dim = self.embedding_dimension;
        let mut embedding = vec![0.0f32; dim];
        let lowered = text.to_lowercase();

        for (group, keywords) in KEYWORD_GROUPS.iter().enumerate() {
            if keywords.iter().any(|k| lowered.contains(k)) {
                embedding[(group * 2) % dim] += 0.9;
                embedding[(group * 2 + 1) % dim] += 0.8;
            }
        }

        // Low-weight, zero-centred tail so unrelated texts can land below the threshold
        let text_hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        for i in 16..32 {
            let bucket = (text_hash.wrapping_add(i as u64 * 7919) % 100) as f32 / 100.0;
            embedding[i % dim] += (bucket - 0.5) * 0.3;
        }

        let magnitude: f32 = embedding.iter().map(|&v| v * v).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        embedding
    }
}

impl Default for MockEmbeddingService {
    fn default() -> Self {
        Self::new(384)
    }
}

#[async_trait]
impl EmbeddingGenerator for MockEmbeddingService {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, CoreError> {
        Ok(self.generate_deterministic_embedding(text))
    }
}

/// Configuration for embedding services
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingServiceConfig {
    /// Embedding model behind an HTTP model server
    Http {
        endpoint: String,
        model: String,
        timeout_secs: Option<u64>,
    },
    /// Deterministic local embeddings
    Mock { dimensions: usize },
}

impl Default for EmbeddingServiceConfig {
    fn default() -> Self {
        Self::Http {
            endpoint: DEFAULT_EMBEDDING_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Create an embedding service from the provided configuration.
/// Called once at startup; the returned handle is shared for the process lifetime.
pub fn create_embedding_service(
    config: EmbeddingServiceConfig,
) -> Result<Arc<dyn EmbeddingGenerator>, CoreError> {
    match config {
        #[cfg(feature = "adapters")]
        EmbeddingServiceConfig::Http { endpoint, model, timeout_secs } => {
            tracing::info!(%endpoint, %model, "Using HTTP embedding model");
            Ok(Arc::new(HttpEmbeddingService::new(endpoint, model, timeout_secs)?))
        }
        #[cfg(not(feature = "adapters"))]
        EmbeddingServiceConfig::Http { .. } => Err(CoreError::Internal(
            "HTTP embedding service requires the 'adapters' feature".to_string(),
        )),
        EmbeddingServiceConfig::Mock { dimensions } => {
            tracing::info!(dimensions, "Using mock embedding service");
            Ok(Arc::new(MockEmbeddingService::new(dimensions)))
        }
    }
}
