//! VectorStore trait definition for vector database interaction

use async_trait::async_trait;

use crate::data::{
    entities::StoredRecord,
    errors::VectorStoreError,
    trace_context::TraceContext,
};

/// Represents the interface for the vector database holding exercise records.
/// This abstracts the underlying database technology (e.g. Weaviate).
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Creates one object in `collection`.
    ///
    /// Contract: fire-and-forget; there is no transaction spanning several inserts.
    /// When `vector` is given it is stored alongside the properties so the object
    /// can be found by `near_vector`.
    async fn insert(
        &self,
        trace_ctx: &TraceContext,
        collection: &str,
        properties: StoredRecord,
        vector: Option<&[f32]>,
    ) -> Result<(), VectorStoreError>;

    /// Approximate nearest-neighbour search.
    ///
    /// Contract: returns the requested `fields` of every record whose certainty
    /// against `vector` is at least `min_certainty`, most similar first. Equal
    /// certainties keep insertion order.
    async fn near_vector(
        &self,
        trace_ctx: &TraceContext,
        collection: &str,
        fields: &[&str],
        vector: &[f32],
        min_certainty: f32,
    ) -> Result<Vec<StoredRecord>, VectorStoreError>;

    /// Whether `collection` holds at least one record carrying `field`.
    async fn has_records(
        &self,
        trace_ctx: &TraceContext,
        collection: &str,
        field: &str,
    ) -> Result<bool, VectorStoreError>;

    /// Readiness probe used by the health endpoint.
    async fn health_check(&self) -> Result<bool, VectorStoreError> {
        Ok(true)
    }
}
