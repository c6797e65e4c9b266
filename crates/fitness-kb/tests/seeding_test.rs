//! Catalog seeding over the in-memory store

use std::sync::Arc;

use fitness_kb::{
    data::{catalog::EXERCISE_COLLECTION, SeedOutcome, TraceContext},
    storage::InMemoryVectorStore,
};
use pretty_assertions::assert_eq;

mod test_helpers;
use test_helpers::{init_test_tracing, mock_generator, pipeline};

#[tokio::test]
async fn test_seeding_twice_inserts_catalog_once() {
    init_test_tracing();
    let store = Arc::new(InMemoryVectorStore::new());
    let (_, seeder) = pipeline(mock_generator(), store.clone());
    let trace_ctx = TraceContext::new_root();

    assert_eq!(
        seeder.seed_if_empty(&trace_ctx).await.unwrap(),
        SeedOutcome::Seeded { inserted: 3 }
    );
    assert_eq!(
        seeder.seed_if_empty(&trace_ctx).await.unwrap(),
        SeedOutcome::AlreadyPopulated
    );

    assert_eq!(store.len(EXERCISE_COLLECTION).await, 3);
    let names: Vec<String> = store
        .records(EXERCISE_COLLECTION)
        .await
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Push-ups", "Squats", "Jogging"]);
}

#[tokio::test]
async fn test_seeded_records_are_searchable() {
    let store = Arc::new(InMemoryVectorStore::new());
    let (recommender, seeder) = pipeline(mock_generator(), store);
    let trace_ctx = TraceContext::new_root();

    seeder.seed_if_empty(&trace_ctx).await.unwrap();

    // Each catalog text is its own nearest neighbour.
    let result = recommender
        .with_min_certainty(0.99)
        .recommend_text("Squats: A lower-body strength exercise.", &trace_ctx)
        .await
        .unwrap();
    assert_eq!(result.exercises()[0].name, "Squats");
    assert!(!result.is_failure());
}
