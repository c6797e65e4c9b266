//! Fitness advisor server
//!
//! Wires configuration, the embedding model and the vector store into an
//! axum application serving the advisor page and JSON API.

use std::sync::Arc;

use fitness_kb::{
    adapters::{WeaviateConfig, WeaviateStore},
    create_embedding_service,
    storage::InMemoryVectorStore,
    traits::{EmbeddingGenerator, VectorStore},
};

/// API module
pub mod api;

/// Server module
pub mod server;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

/// HTML rendering
pub mod ui;

// Re-export key types
pub use config::{EmbeddingProvider, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::AdvisorServer;

/// Run function
pub async fn run(config: ServerConfig) -> ServerResult<()> {
    init_logging(&config);

    let embedding_generator = create_embedding_generator(&config)?;
    let store = create_vector_store(&config)?;

    let server = AdvisorServer::new(config, embedding_generator, store);
    server.run().await
}

/// Initialize logging. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &ServerConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // A subscriber may already be installed (tests, embedding binaries)
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}

/// Create the embedding model client
pub fn create_embedding_generator(config: &ServerConfig) -> ServerResult<Arc<dyn EmbeddingGenerator>> {
    Ok(create_embedding_service(config.embedding_config())?)
}

/// Create the vector store client
pub fn create_vector_store(config: &ServerConfig) -> ServerResult<Arc<dyn VectorStore>> {
    if config.uses_memory_store() {
        tracing::info!("Using in-memory vector store");
        return Ok(Arc::new(InMemoryVectorStore::new()));
    }

    tracing::info!("Using Weaviate vector store at {}", config.vector_store_url);
    let store = WeaviateStore::new(WeaviateConfig {
        url: config.vector_store_url.clone(),
        timeout_secs: config.request_timeout_secs,
    })?;
    Ok(Arc::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_and_mock_embeddings_from_config() {
        let config = ServerConfig {
            vector_store_url: "memory://".to_string(),
            embedding_provider: EmbeddingProvider::Mock,
            embedding_dimensions: 8,
            ..ServerConfig::default()
        };

        let generator = create_embedding_generator(&config).unwrap();
        assert_eq!(generator.generate_embedding("squats").await.unwrap().len(), 8);

        let store = create_vector_store(&config).unwrap();
        assert!(store.health_check().await.unwrap());
    }

    #[test]
    fn test_weaviate_store_from_default_config() {
        assert!(create_vector_store(&ServerConfig::default()).is_ok());
    }
}
