//! mockall doubles for the core traits
//!
//! Useful when a test must assert how often (or whether) a collaborator is called.

use async_trait::async_trait;
use mockall::mock;

use crate::data::errors::CoreError;
use crate::traits::EmbeddingGenerator;

mock! {
    pub EmbeddingGenerator {}

    #[async_trait]
    impl EmbeddingGenerator for EmbeddingGenerator {
        async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, CoreError>;
    }
}
