//! Error types for the advisor server

use thiserror::Error;

use fitness_kb::{CoreError, VectorStoreError};

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Embedding model error
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    /// Vector store error
    #[error("Vector store error: {0}")]
    VectorStoreError(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => ServerError::ValidationError(msg),
            CoreError::StoreError(e) => ServerError::VectorStoreError(e.to_string()),
            e if e.is_encoding_failure() => ServerError::EmbeddingError(e.to_string()),
            other => ServerError::InternalError(other.to_string()),
        }
    }
}

impl From<VectorStoreError> for ServerError {
    fn from(err: VectorStoreError) -> Self {
        ServerError::VectorStoreError(err.to_string())
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::InternalError(format!("IO error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_by_kind() {
        let err: ServerError = CoreError::ValidationError("Please enter a fitness goal.".into()).into();
        assert!(matches!(err, ServerError::ValidationError(ref m) if m == "Please enter a fitness goal."));

        let err: ServerError = CoreError::EmbeddingError("model offline".into()).into();
        assert!(matches!(err, ServerError::EmbeddingError(ref m) if m.contains("model offline")));

        let err: ServerError =
            CoreError::StoreError(VectorStoreError::ConnectionError("refused".into())).into();
        assert!(matches!(err, ServerError::VectorStoreError(ref m) if m.contains("refused")));
    }
}
