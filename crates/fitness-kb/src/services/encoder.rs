//! Goal encoding

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::data::{CoreError, FitnessGoal, GoalVector, TraceContext};
use crate::traits::EmbeddingGenerator;

/// Turns a fitness goal into a vector suitable for similarity search.
#[derive(Clone)]
pub struct GoalEncoder {
    embedding_generator: Arc<dyn EmbeddingGenerator>,
}

impl GoalEncoder {
    pub fn new(embedding_generator: Arc<dyn EmbeddingGenerator>) -> Self {
        Self { embedding_generator }
    }

    /// Any model failure surfaces as `CoreError::EmbeddingError`.
    #[instrument(skip(self, goal), fields(trace_id = %trace_ctx.trace_id))]
    pub async fn encode(&self, goal: &FitnessGoal, trace_ctx: &TraceContext) -> Result<GoalVector, CoreError> {
        self.encode_text(goal.as_str(), trace_ctx).await
    }

    /// Encodes arbitrary text, e.g. a catalog entry being seeded.
    pub async fn encode_text(&self, text: &str, trace_ctx: &TraceContext) -> Result<GoalVector, CoreError> {
        let values = self
            .embedding_generator
            .generate_embedding(text)
            .await
            .map_err(|e| match e {
                e if e.is_encoding_failure() => e,
                other => CoreError::embedding_error_with_context(
                    "embedding generation failed",
                    Some(trace_ctx),
                    Some(other),
                ),
            })?;
        let vector = GoalVector::new(values)?;
        debug!(dimension = vector.dimension(), "Encoded text");
        Ok(vector)
    }
}

impl std::fmt::Debug for GoalEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalEncoder").finish()
    }
}
