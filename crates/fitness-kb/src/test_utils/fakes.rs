use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::data::{
    entities::StoredRecord,
    errors::{CoreError, VectorStoreError},
    trace_context::TraceContext,
};
use crate::embedding::MockEmbeddingService;
use crate::traits::{EmbeddingGenerator, VectorStore};

/// Fake implementation of EmbeddingGenerator for testing
pub struct FakeEmbeddingService {
    data: Mutex<HashMap<String, Vec<f32>>>,
    next_error: Mutex<Option<CoreError>>,
    calls: Mutex<Vec<String>>,
    fallback: MockEmbeddingService,
}

impl FakeEmbeddingService {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            next_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            fallback: MockEmbeddingService::new(16),
        }
    }

    /// Adds a precomputed embedding for a specific text
    pub fn add_embedding(&self, text: &str, embedding: Vec<f32>) {
        self.data.lock().insert(text.to_string(), embedding);
    }

    /// The next call fails with `error`; later calls succeed again.
    pub fn fail_with(&self, error: CoreError) {
        *self.next_error.lock() = Some(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Texts passed to the generator, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl Default for FakeEmbeddingService {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FakeEmbeddingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeEmbeddingService").finish()
    }
}

#[async_trait]
impl EmbeddingGenerator for FakeEmbeddingService {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, CoreError> {
        self.calls.lock().push(text.to_string());
        let injected = self.next_error.lock().take();
        if let Some(error) = injected {
            return Err(error);
        }
        let precomputed = self.data.lock().get(text).cloned();
        match precomputed {
            Some(embedding) => Ok(embedding),
            None => self.fallback.generate_embedding(text).await,
        }
    }
}

/// One recorded `near_vector` call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub collection: String,
    pub fields: Vec<String>,
    pub vector: Vec<f32>,
    pub min_certainty: f32,
}

/// One recorded `insert` call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedInsert {
    pub collection: String,
    pub properties: StoredRecord,
    pub vector: Option<Vec<f32>>,
}

/// Fake implementation of VectorStore with canned results, failure
/// injection and call recording.
pub struct FakeVectorStore {
    query_results: Mutex<Vec<StoredRecord>>,
    query_error: Mutex<Option<VectorStoreError>>,
    insert_error: Mutex<Option<VectorStoreError>>,
    existence_error: Mutex<Option<VectorStoreError>>,
    has_records_override: Mutex<Option<bool>>,
    healthy: Mutex<Option<bool>>,
    queries: Mutex<Vec<RecordedQuery>>,
    inserts: Mutex<Vec<RecordedInsert>>,
    existence_checks: Mutex<usize>,
}

impl FakeVectorStore {
    pub fn new() -> Self {
        Self {
            query_results: Mutex::new(Vec::new()),
            query_error: Mutex::new(None),
            insert_error: Mutex::new(None),
            existence_error: Mutex::new(None),
            has_records_override: Mutex::new(None),
            healthy: Mutex::new(Some(true)),
            queries: Mutex::new(Vec::new()),
            inserts: Mutex::new(Vec::new()),
            existence_checks: Mutex::new(0),
        }
    }

    /// Records returned by every `near_vector` call. Non-object values are skipped.
    pub fn set_query_results(&self, results: Vec<Value>) {
        *self.query_results.lock() = results
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
    }

    pub fn fail_queries_with(&self, error: VectorStoreError) {
        *self.query_error.lock() = Some(error);
    }

    pub fn fail_inserts_with(&self, error: VectorStoreError) {
        *self.insert_error.lock() = Some(error);
    }

    pub fn fail_existence_checks_with(&self, error: VectorStoreError) {
        *self.existence_error.lock() = Some(error);
    }

    /// Overrides `has_records`; by default it reports whether anything was inserted.
    pub fn set_has_records(&self, has_records: bool) {
        *self.has_records_override.lock() = Some(has_records);
    }

    /// `None` makes the health check fail with a connection error.
    pub fn set_healthy(&self, healthy: Option<bool>) {
        *self.healthy.lock() = healthy;
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }

    pub fn last_query(&self) -> Option<RecordedQuery> {
        self.queries.lock().last().cloned()
    }

    pub fn inserted(&self) -> Vec<RecordedInsert> {
        self.inserts.lock().clone()
    }

    pub fn existence_check_count(&self) -> usize {
        *self.existence_checks.lock()
    }
}

impl Default for FakeVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FakeVectorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeVectorStore").finish()
    }
}

#[async_trait]
impl VectorStore for FakeVectorStore {
    async fn insert(
        &self,
        _trace_ctx: &TraceContext,
        collection: &str,
        properties: StoredRecord,
        vector: Option<&[f32]>,
    ) -> Result<(), VectorStoreError> {
        if let Some(error) = self.insert_error.lock().clone() {
            return Err(error);
        }
        self.inserts.lock().push(RecordedInsert {
            collection: collection.to_string(),
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
        self.queries.lock().push(RecordedQuery {
            collection: collection.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
            vector: vector.to_vec(),
            min_certainty,
        });
        if let Some(error) = self.query_error.lock().clone() {
            return Err(error);
        }
        Ok(self.query_results.lock().clone())
    }

    async fn has_records(
        &self,
        _trace_ctx: &TraceContext,
        _collection: &str,
        _field: &str,
    ) -> Result<bool, VectorStoreError> {
        *self.existence_checks.lock() += 1;
        if let Some(error) = self.existence_error.lock().clone() {
            return Err(error);
        }
        if let Some(has_records) = *self.has_records_override.lock() {
            return Ok(has_records);
        }
        Ok(!self.inserts.lock().is_empty())
    }

    async fn health_check(&self) -> Result<bool, VectorStoreError> {
        match *self.healthy.lock() {
            Some(healthy) => Ok(healthy),
            None => Err(VectorStoreError::ConnectionError("store unreachable".to_string())),
        }
    }
}
