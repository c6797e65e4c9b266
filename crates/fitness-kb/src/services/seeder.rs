//! Catalog seeding for development setups

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::data::{
    catalog::{default_catalog, EXERCISE_COLLECTION, EXISTENCE_FIELD},
    CoreError, Exercise, SeedOutcome, TraceContext,
};
use crate::services::encoder::GoalEncoder;
use crate::traits::VectorStore;

/// Inserts the fixed exercise catalog into an empty collection.
///
/// Not atomic: two seeds racing on an empty collection can both insert.
pub struct DataSeeder {
    encoder: GoalEncoder,
    store: Arc<dyn VectorStore>,
    catalog: Vec<Exercise>,
}

impl DataSeeder {
    pub fn new(encoder: GoalEncoder, store: Arc<dyn VectorStore>) -> Self {
        Self::with_catalog(encoder, store, default_catalog())
    }

    pub fn with_catalog(encoder: GoalEncoder, store: Arc<dyn VectorStore>, catalog: Vec<Exercise>) -> Self {
        Self { encoder, store, catalog }
    }

    pub fn catalog(&self) -> &[Exercise] {
        &self.catalog
    }

    /// No-op when the collection already holds named records. A failed
    /// existence check is treated as an empty collection.
    #[instrument(skip(self), fields(trace_id = %trace_ctx.trace_id))]
    pub async fn seed_if_empty(&self, trace_ctx: &TraceContext) -> Result<SeedOutcome, CoreError> {
        match self
            .store
            .has_records(trace_ctx, EXERCISE_COLLECTION, EXISTENCE_FIELD)
            .await
        {
            Ok(true) => {
                info!("Exercise data already exists, skipping seed");
                return Ok(SeedOutcome::AlreadyPopulated);
            }
            Ok(false) => info!("Exercise collection is empty, populating"),
            Err(e) => warn!(error = %e, "Existence check failed, populating new data"),
        }

        for exercise in &self.catalog {
            let vector = self
                .encoder
                .encode_text(&exercise.embedding_text(), trace_ctx)
                .await?;
            self.store
                .insert(
                    &trace_ctx.new_child(),
                    EXERCISE_COLLECTION,
                    exercise.to_record()?,
                    Some(vector.as_slice()),
                )
                .await?;
        }

        info!(inserted = self.catalog.len(), "Seeded exercise catalog");
        Ok(SeedOutcome::Seeded {
            inserted: self.catalog.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VectorStoreError;
    use crate::test_utils::{FakeEmbeddingService, FakeVectorStore};
    use pretty_assertions::assert_eq;

    fn seeder(store: Arc<FakeVectorStore>) -> DataSeeder {
        DataSeeder::new(GoalEncoder::new(Arc::new(FakeEmbeddingService::new())), store)
    }

    #[tokio::test]
    async fn test_empty_collection_gets_three_records() {
        let store = Arc::new(FakeVectorStore::new());

        let outcome = seeder(store.clone()).seed_if_empty(&TraceContext::new_root()).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Seeded { inserted: 3 });
        let inserted = store.inserted();
        let names: Vec<_> = inserted.iter().map(|i| i.properties["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Push-ups", "Squats", "Jogging"]);
        assert!(inserted.iter().all(|i| i.collection == "Exercise" && i.vector.is_some()));
    }

    #[tokio::test]
    async fn test_populated_collection_is_left_alone() {
        let store = Arc::new(FakeVectorStore::new());
        store.set_has_records(true);

        let outcome = seeder(store.clone()).seed_if_empty(&TraceContext::new_root()).await.unwrap();

        assert_eq!(outcome, SeedOutcome::AlreadyPopulated);
        assert!(store.inserted().is_empty());
    }

    #[tokio::test]
    async fn test_failed_existence_check_assumes_empty() {
        let store = Arc::new(FakeVectorStore::new());
        store.fail_existence_checks_with(VectorStoreError::ConnectionError("timeout".into()));

        let outcome = seeder(store.clone()).seed_if_empty(&TraceContext::new_root()).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Seeded { inserted: 3 });
        assert_eq!(store.inserted().len(), 3);
    }

    #[tokio::test]
    async fn test_insert_failure_propagates() {
        let store = Arc::new(FakeVectorStore::new());
        store.fail_inserts_with(VectorStoreError::SchemaError("class Exercise not found".into()));

        let err = seeder(store).seed_if_empty(&TraceContext::new_root()).await.unwrap_err();
        assert!(err.is_store_failure());
    }

    #[tokio::test]
    async fn test_encoding_failure_propagates_before_insert() {
        let store = Arc::new(FakeVectorStore::new());
        let generator = Arc::new(FakeEmbeddingService::new());
        generator.fail_with(CoreError::EmbeddingError("model unavailable".into()));
        let seeder = DataSeeder::new(GoalEncoder::new(generator), store.clone());

        let err = seeder.seed_if_empty(&TraceContext::new_root()).await.unwrap_err();
        assert!(err.is_encoding_failure());
        assert!(store.inserted().is_empty());
    }
}
