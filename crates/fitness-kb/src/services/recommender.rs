//! Exercise recommendation pipeline

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::data::{
    catalog::{DEFAULT_MIN_CERTAINTY, EXERCISE_COLLECTION, EXERCISE_FIELDS},
    CoreError, Exercise, FitnessGoal, Recommendation, TraceContext, VectorStoreError,
};
use crate::services::encoder::GoalEncoder;
use crate::traits::VectorStore;

/// Encodes a goal, searches the exercise collection and substitutes the
/// fallback or error sentinel when needed.
pub struct ExerciseRecommender {
    encoder: GoalEncoder,
    store: Arc<dyn VectorStore>,
    collection: String,
    min_certainty: f32,
}

impl ExerciseRecommender {
    pub fn new(encoder: GoalEncoder, store: Arc<dyn VectorStore>) -> Self {
        Self {
            encoder,
            store,
            collection: EXERCISE_COLLECTION.to_string(),
            min_certainty: DEFAULT_MIN_CERTAINTY,
        }
    }

    pub fn with_min_certainty(mut self, min_certainty: f32) -> Self {
        self.min_certainty = min_certainty;
        self
    }

    pub fn min_certainty(&self) -> f32 {
        self.min_certainty
    }

    /// Validates raw input, then runs the pipeline. The only error is
    /// `CoreError::ValidationError`, returned before anything downstream runs.
    pub async fn recommend_text(&self, goal: &str, trace_ctx: &TraceContext) -> Result<Recommendation, CoreError> {
        let goal = FitnessGoal::parse(goal)?;
        Ok(self.recommend(&goal, trace_ctx).await)
    }

    /// Never fails and never returns an empty list. No retries.
    #[instrument(skip(self, goal), fields(trace_id = %trace_ctx.trace_id))]
    pub async fn recommend(&self, goal: &FitnessGoal, trace_ctx: &TraceContext) -> Recommendation {
        match self.find_matches(goal, trace_ctx).await {
            Ok(exercises) if exercises.is_empty() => {
                info!("No exercise above certainty {}, using fallback", self.min_certainty);
                Recommendation::fallback()
            }
            Ok(exercises) => {
                info!(matches = exercises.len(), "Found matching exercises");
                Recommendation::Matches(exercises)
            }
            Err(e) => {
                warn!(error = %e, "Recommendation failed");
                Recommendation::failed(e.to_string())
            }
        }
    }

    async fn find_matches(&self, goal: &FitnessGoal, trace_ctx: &TraceContext) -> Result<Vec<Exercise>, CoreError> {
        let vector = self.encoder.encode(goal, trace_ctx).await?;

        let records = self
            .store
            .near_vector(
                &trace_ctx.new_child(),
                &self.collection,
                &EXERCISE_FIELDS,
                vector.as_slice(),
                self.min_certainty,
            )
            .await?;

        records
            .into_iter()
            .map(|record| {
                Exercise::from_record(record)
                    .map_err(|e| CoreError::StoreError(VectorStoreError::MappingError(e.to_string())))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::{error_sentinel, walking_fallback, EMPTY_GOAL_MESSAGE};
    use crate::test_utils::{FakeEmbeddingService, FakeVectorStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn recommender(store: Arc<FakeVectorStore>) -> ExerciseRecommender {
        let generator = Arc::new(FakeEmbeddingService::new());
        ExerciseRecommender::new(GoalEncoder::new(generator), store)
    }

    #[tokio::test]
    async fn test_matches_are_returned_in_store_order() {
        let store = Arc::new(FakeVectorStore::new());
        store.set_query_results(vec![
            json!({"name": "Jogging", "description": "A cardio activity to improve endurance."}),
            json!({"name": "Squats", "description": "A lower-body strength exercise."}),
        ]);

        let result = recommender(store.clone())
            .recommend_text("endurance", &TraceContext::new_root())
            .await
            .unwrap();

        let names: Vec<_> = result.exercises().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Jogging", "Squats"]);

        let query = store.last_query().expect("query recorded");
        assert_eq!(query.collection, "Exercise");
        assert_eq!(query.fields, vec!["name", "description"]);
        assert_eq!(query.min_certainty, 0.5);
    }

    #[tokio::test]
    async fn test_weight_loss_without_matches_falls_back_to_walking() {
        let store = Arc::new(FakeVectorStore::new());

        let result = recommender(store)
            .recommend_text("weight loss", &TraceContext::new_root())
            .await
            .unwrap();

        assert_eq!(result, Recommendation::Fallback(walking_fallback()));
        assert_eq!(result.exercises()[0].description, "A basic cardio activity for all fitness levels.");
    }

    #[tokio::test]
    async fn test_store_failure_yields_error_sentinel() {
        let store = Arc::new(FakeVectorStore::new());
        store.fail_queries_with(VectorStoreError::ConnectionError("connection refused".into()));

        let result = recommender(store.clone())
            .recommend_text("weight loss", &TraceContext::new_root())
            .await
            .unwrap();

        assert_eq!(result.exercises(), &[error_sentinel()]);
        assert!(result.failure().unwrap().contains("connection refused"));
        assert_eq!(store.query_count(), 1, "no retries");
    }

    #[tokio::test]
    async fn test_encoding_failure_yields_error_sentinel_without_query() {
        let store = Arc::new(FakeVectorStore::new());
        let generator = Arc::new(FakeEmbeddingService::new());
        generator.fail_with(CoreError::EmbeddingError("model unavailable".into()));
        let recommender = ExerciseRecommender::new(GoalEncoder::new(generator), store.clone());

        let result = recommender
            .recommend_text("muscle gain", &TraceContext::new_root())
            .await
            .unwrap();

        assert!(result.is_failure());
        assert!(result.failure().unwrap().contains("model unavailable"));
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn test_unmappable_record_is_store_failure() {
        let store = Arc::new(FakeVectorStore::new());
        store.set_query_results(vec![json!({"name": "Plank"})]);

        let result = recommender(store)
            .recommend_text("core", &TraceContext::new_root())
            .await
            .unwrap();

        assert!(result.is_failure());
        assert!(result.failure().unwrap().contains("mapping"));
    }

    #[tokio::test]
    async fn test_empty_goal_is_rejected_before_any_call() {
        let store = Arc::new(FakeVectorStore::new());
        let generator = Arc::new(FakeEmbeddingService::new());
        let recommender = ExerciseRecommender::new(GoalEncoder::new(generator.clone()), store.clone());

        let err = recommender.recommend_text("", &TraceContext::new_root()).await.unwrap_err();

        assert_eq!(err.to_string(), EMPTY_GOAL_MESSAGE);
        assert_eq!(generator.call_count(), 0);
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn test_custom_threshold_is_passed_to_store() {
        let store = Arc::new(FakeVectorStore::new());
        let recommender = recommender(store.clone()).with_min_certainty(0.8);

        recommender.recommend_text("flexibility", &TraceContext::new_root()).await.unwrap();
        assert_eq!(store.last_query().unwrap().min_certainty, 0.8);
    }
}
