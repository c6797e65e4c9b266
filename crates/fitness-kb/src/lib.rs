//! Exercise knowledge base
//!
//! Encodes free-text fitness goals, searches a vector store for similar
//! exercises and seeds the store with a small starter catalog.

// Core modules
pub mod data;
pub mod embedding;
pub mod services;
pub mod storage;
pub mod traits;

// Implementation adapters
#[cfg(feature = "adapters")]
pub mod adapters;

// Testing utilities
pub mod test_utils;

// Re-export key types for convenient usage
pub use data::catalog::{
    DEFAULT_MIN_CERTAINTY, EMPTY_GOAL_MESSAGE, EXERCISE_COLLECTION, NUTRITION_FACTS,
};
pub use data::errors::{CoreError, VectorStoreError};
pub use data::trace_context::TraceContext;
pub use data::{
    default_catalog, error_sentinel, walking_fallback, Exercise, FitnessGoal, GoalVector,
    Recommendation, SeedOutcome, StoredRecord,
};

// Re-export core traits
pub use traits::{EmbeddingGenerator, VectorStore};

// Re-export embedding services
pub use embedding::{create_embedding_service, EmbeddingServiceConfig, MockEmbeddingService};
#[cfg(feature = "adapters")]
pub use embedding::HttpEmbeddingService;

// Re-export storage backends
pub use storage::InMemoryVectorStore;
#[cfg(feature = "adapters")]
pub use adapters::{WeaviateConfig, WeaviateStore};

// Re-export core services
pub use services::{DataSeeder, ExerciseRecommender, GoalEncoder};
