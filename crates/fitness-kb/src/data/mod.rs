//! Core data structures for the exercise knowledge base

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod trace_context;

pub use catalog::{default_catalog, error_sentinel, walking_fallback};
pub use entities::{Exercise, FitnessGoal, GoalVector, Recommendation, SeedOutcome, StoredRecord};
pub use errors::{CoreError, VectorStoreError};
pub use trace_context::TraceContext;
