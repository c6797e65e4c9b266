//! Error types for the exercise knowledge base

use thiserror::Error;

use crate::data::TraceContext;

/// Base error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// User input rejected before any downstream call was made.
    #[error("{0}")]
    ValidationError(String),

    #[error("Embedding generation error: {0}")]
    EmbeddingError(String),

    #[error("Embedding error with context: {message}")]
    EmbeddingErrorWithContext {
        message: String,
        trace_id: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Vector store error: {0}")]
    StoreError(#[from] VectorStoreError),

    #[error("Serialization/Deserialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Internal system error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Helper to create an embedding error carrying the request's trace id
    pub fn embedding_error_with_context<E>(
        message: impl Into<String>,
        trace_ctx: Option<&TraceContext>,
        source: Option<E>,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CoreError::EmbeddingErrorWithContext {
            message: message.into(),
            trace_id: trace_ctx.map(|ctx| ctx.trace_id.clone()),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// True for failures of the encoding step (EncodingFailure).
    pub fn is_encoding_failure(&self) -> bool {
        matches!(
            self,
            CoreError::EmbeddingError(_) | CoreError::EmbeddingErrorWithContext { .. }
        )
    }

    /// True for failures of the vector store (StoreFailure).
    pub fn is_store_failure(&self) -> bool {
        matches!(self, CoreError::StoreError(_))
    }
}

/// Specific error type for the vector store.
#[derive(Error, Debug, Clone)]
pub enum VectorStoreError {
    #[error("Vector store connection error: {0}")]
    ConnectionError(String),
    #[error("Vector query execution error: {0}")]
    QueryError(String),
    #[error("Data mapping error from store result: {0}")]
    MappingError(String),
    #[error("Schema error: {0}")]
    SchemaError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown vector store error: {0}")]
    Unknown(String),
}

impl From<String> for VectorStoreError {
    fn from(error: String) -> Self {
        VectorStoreError::Unknown(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_displays_message_verbatim() {
        let error = CoreError::ValidationError("Please enter a fitness goal.".into());
        assert_eq!(error.to_string(), "Please enter a fitness goal.");
    }

    #[test]
    fn test_store_error_display() {
        let error = VectorStoreError::ConnectionError("connection refused".into());
        assert_eq!(error.to_string(), "Vector store connection error: connection refused");

        let wrapped: CoreError = error.into();
        assert!(wrapped.is_store_failure());
        assert!(!wrapped.is_encoding_failure());
        assert_eq!(
            wrapped.to_string(),
            "Vector store error: Vector store connection error: connection refused"
        );
    }

    #[test]
    fn test_embedding_error_with_context() {
        let trace_ctx = TraceContext::new_root();
        let error = CoreError::embedding_error_with_context(
            "model server returned 500",
            Some(&trace_ctx),
            None::<VectorStoreError>,
        );

        assert!(error.is_encoding_failure());
        match error {
            CoreError::EmbeddingErrorWithContext { message, trace_id, source } => {
                assert_eq!(message, "model server returned 500");
                assert_eq!(trace_id, Some(trace_ctx.trace_id));
                assert!(source.is_none());
            }
            other => panic!("Expected EmbeddingErrorWithContext, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_from_string() {
        let error: VectorStoreError = "boom".to_string().into();
        assert!(matches!(error, VectorStoreError::Unknown(msg) if msg == "boom"));
    }
}
