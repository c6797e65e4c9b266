//! Entities handled by the advisor pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::catalog::{error_sentinel, walking_fallback, EMPTY_GOAL_MESSAGE};
use crate::data::errors::CoreError;

/// Property map of a record as returned by the vector store.
pub type StoredRecord = serde_json::Map<String, serde_json::Value>;

/// An exercise stored in the knowledge base. Identity is the `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub description: String,
}

impl Exercise {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Text fed to the embedding model when the exercise is seeded.
    pub fn embedding_text(&self) -> String {
        format!("{}: {}", self.name, self.description)
    }

    /// Store properties for this exercise.
    pub fn to_record(&self) -> Result<StoredRecord, CoreError> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(CoreError::Internal(format!(
                "exercise serialized to non-object value: {}",
                other
            ))),
        }
    }

    /// Maps a store record back to an exercise.
    pub fn from_record(record: StoredRecord) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(record))
    }
}

/// A free-text fitness goal, guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitnessGoal(String);

impl FitnessGoal {
    /// Whitespace-only input counts as empty.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        if text.trim().is_empty() {
            return Err(CoreError::ValidationError(EMPTY_GOAL_MESSAGE.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Embedding of a goal. Produced per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalVector(Vec<f32>);

impl GoalVector {
    pub fn new(values: Vec<f32>) -> Result<Self, CoreError> {
        if values.is_empty() {
            return Err(CoreError::EmbeddingError(
                "embedding model returned an empty vector".to_string(),
            ));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }
}

/// Result of one recommendation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Similar exercises, most similar first.
    Matches(Vec<Exercise>),
    /// Nothing cleared the similarity threshold.
    Fallback(Exercise),
    /// Encoding or the store query failed.
    Failed { sentinel: Exercise, reason: String },
}

impl Recommendation {
    pub fn fallback() -> Self {
        Recommendation::Fallback(walking_fallback())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Recommendation::Failed {
            sentinel: error_sentinel(),
            reason: reason.into(),
        }
    }

    /// Never empty.
    pub fn exercises(&self) -> &[Exercise] {
        match self {
            Recommendation::Matches(exercises) => exercises,
            Recommendation::Fallback(exercise) => std::slice::from_ref(exercise),
            Recommendation::Failed { sentinel, .. } => std::slice::from_ref(sentinel),
        }
    }

    /// Banner text when the pipeline failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Recommendation::Failed { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Recommendation::Failed { .. })
    }
}

/// What a seeding request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedOutcome {
    AlreadyPopulated,
    Seeded { inserted: usize },
}
