//! EmbeddingGenerator trait definition for vector embeddings

use async_trait::async_trait;
use crate::data::errors::CoreError;

/// Represents the interface for generating vector embeddings from text.
#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    /// Generates an embedding vector for the given text.
    ///
    /// Contract: uses the configured embedding model to turn the text into a dense
    /// vector of fixed dimension. Model or transport failures are `CoreError::EmbeddingError`.
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, CoreError>;
}
