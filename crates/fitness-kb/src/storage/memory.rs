use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::data::{
    entities::StoredRecord,
    errors::VectorStoreError,
    trace_context::TraceContext,
};
use crate::traits::VectorStore;

#[derive(Debug, Clone)]
struct StoredObject {
    properties: StoredRecord,
    vector: Option<Vec<f32>>,
}

/// In-memory vector store for development and testing.
///
/// Certainty is computed the way Weaviate does for cosine distance,
/// `(1 + cosine) / 2`, so thresholds carry over between backends.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorStore {
    collections: Arc<RwLock<HashMap<String, Vec<StoredObject>>>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, Vec::len)
    }

    /// All stored property maps of `collection`, in insertion order.
    pub async fn records(&self, collection: &str) -> Vec<StoredRecord> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|objects| objects.iter().map(|o| o.properties.clone()).collect())
            .unwrap_or_default()
    }
}

/// `(1 + cosine) / 2`; `None` when the vectors cannot be compared.
pub fn certainty(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    let cosine = (dot / (norm_a * norm_b)).clamp(-1.0, 1.0);
    Some((1.0 + cosine) / 2.0)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn insert(
        &self,
        _trace_ctx: &TraceContext,
        collection: &str,
        properties: StoredRecord,
        vector: Option<&[f32]>,
    ) -> Result<(), VectorStoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredObject {
                properties,
                vector: vector.map(<[f32]>::to_vec),
            });
        Ok(())
    }

    async fn near_vector(
        &self,
        _trace_ctx: &TraceContext,
        collection: &str,
        fields: &[&str],
        vector: &[f32],
        min_certainty: f32,
    ) -> Result<Vec<StoredRecord>, VectorStoreError> {
        if vector.is_empty() {
            return Err(VectorStoreError::InvalidInput("empty query vector".to_string()));
        }
        let collections = self.collections.read().await;
        let Some(objects) = collections.get(collection) else {
            return Err(VectorStoreError::SchemaError(format!(
                "collection {} does not exist",
                collection
            )));
        };

        // Weaviate rejects the whole query on a dimension mismatch
        if let Some(stored) = objects
            .iter()
            .filter_map(|object| object.vector.as_deref())
            .find(|stored| stored.len() != vector.len())
        {
            return Err(VectorStoreError::QueryError(format!(
                "vector lengths don't match: {} vs {}",
                vector.len(),
                stored.len()
            )));
        }

        let mut scored: Vec<(f32, &StoredObject)> = objects
            .iter()
            .filter_map(|object| {
                let stored = object.vector.as_deref()?;
                certainty(vector, stored).map(|c| (c, object))
            })
            .filter(|(c, _)| *c >= min_certainty)
            .collect();

        // Stable: equal certainties keep insertion order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        debug!(collection, matches = scored.len(), "In-memory near-vector query");

        Ok(scored
            .into_iter()
            .map(|(_, object)| {
                fields
                    .iter()
                    .filter_map(|field| {
                        object
                            .properties
                            .get(*field)
                            .map(|value| (field.to_string(), value.clone()))
                    })
                    .collect()
            })
            .collect())
    }

    async fn has_records(
        &self,
        _trace_ctx: &TraceContext,
        collection: &str,
        field: &str,
    ) -> Result<bool, VectorStoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map_or(false, |objects| objects.iter().any(|o| o.properties.contains_key(field))))
    }
}
