//! Shared helpers for the knowledge base integration tests
#![allow(dead_code)]

use std::sync::Arc;

use fitness_kb::{
    services::{DataSeeder, ExerciseRecommender, GoalEncoder},
    traits::{EmbeddingGenerator, VectorStore},
    MockEmbeddingService,
};

/// Sets up a tracing subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("fitness_kb=debug,test=debug")
        .with_test_writer()
        .try_init();
}

pub fn mock_generator() -> Arc<dyn EmbeddingGenerator> {
    Arc::new(MockEmbeddingService::default())
}

/// Recommender and seeder sharing one generator and one store.
pub fn pipeline(
    generator: Arc<dyn EmbeddingGenerator>,
    store: Arc<dyn VectorStore>,
) -> (ExerciseRecommender, DataSeeder) {
    let encoder = GoalEncoder::new(generator);
    (
        ExerciseRecommender::new(encoder.clone(), store.clone()),
        DataSeeder::new(encoder, store),
    )
}
