//! Configuration for the advisor server
//!
//! Defaults match a local development setup: Weaviate on port 8085 and an
//! embedding model server on port 11434. Every value can be overridden from
//! the environment or a `.env` file.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use fitness_kb::{
    adapters::DEFAULT_WEAVIATE_URL,
    embedding::{DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_URL},
    EmbeddingServiceConfig,
};

use crate::error::{ServerError, ServerResult};

/// Store URL prefix that selects the in-process vector store.
pub const MEMORY_STORE_PREFIX: &str = "memory://";

/// Which embedding backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Model server reached over HTTP
    Http,
    /// Deterministic local embeddings, no model server needed
    Mock,
}

impl FromStr for EmbeddingProvider {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "mock" => Ok(Self::Mock),
            other => Err(ServerError::ConfigError(format!(
                "Unknown embedding provider: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Mock => write!(f, "mock"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Weaviate base URL, or `memory://` for the in-process store
    #[serde(default = "default_vector_store_url")]
    pub vector_store_url: String,

    #[serde(default = "default_embedding_provider")]
    pub embedding_provider: EmbeddingProvider,

    /// Model server base URL
    #[serde(default = "default_embedding_url")]
    pub embedding_url: String,

    /// Embedding model identifier
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Vector length of the mock provider
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// HTTP timeout for model and store calls; none when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_vector_store_url() -> String {
    DEFAULT_WEAVIATE_URL.to_string()
}

fn default_embedding_provider() -> EmbeddingProvider {
    EmbeddingProvider::Http
}

fn default_embedding_url() -> String {
    DEFAULT_EMBEDDING_URL.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_embedding_dimensions() -> usize {
    384
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_host(),
            port: default_port(),
            vector_store_url: default_vector_store_url(),
            embedding_provider: default_embedding_provider(),
            embedding_url: default_embedding_url(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            request_timeout_secs: None,
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a `.env` file (if any) and environment variables
    pub fn load() -> ServerResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Start with defaults
        let mut config = Self::default();

        if let Some(host) = lookup("SERVER_HOST") {
            config.bind_address = host;
        }

        if let Some(port) = lookup("SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.port = port;
            } else {
                warn!("Invalid SERVER_PORT value: {}", port);
            }
        }

        if let Some(url) = lookup("VECTOR_STORE_URL") {
            config.vector_store_url = url;
        }

        if let Some(provider) = lookup("EMBEDDING_PROVIDER") {
            config.embedding_provider = provider.parse()?;
        }

        if let Some(url) = lookup("EMBEDDING_URL") {
            config.embedding_url = url;
        }

        if let Some(model) = lookup("EMBEDDING_MODEL") {
            config.embedding_model = model;
        }

        if let Some(dimensions) = lookup("EMBEDDING_DIMENSIONS") {
            match dimensions.parse::<usize>() {
                Ok(d) if d > 0 => config.embedding_dimensions = d,
                _ => warn!("Invalid EMBEDDING_DIMENSIONS value: {}", dimensions),
            }
        }

        if let Some(timeout) = lookup("REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                config.request_timeout_secs = Some(secs);
            } else {
                warn!("Invalid REQUEST_TIMEOUT_SECS value: {}", timeout);
            }
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            config.log_level = log_level;
        }

        config.validate()?;

        info!(
            bind_address = %config.bind_address,
            port = config.port,
            vector_store_url = %config.vector_store_url,
            embedding_provider = %config.embedding_provider,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Reject configurations that cannot produce working clients
    pub fn validate(&self) -> ServerResult<()> {
        if self.vector_store_url.trim().is_empty() {
            return Err(ServerError::ConfigError("VECTOR_STORE_URL must not be empty".to_string()));
        }
        if self.embedding_provider == EmbeddingProvider::Http {
            if self.embedding_url.trim().is_empty() {
                return Err(ServerError::ConfigError("EMBEDDING_URL must not be empty".to_string()));
            }
            if self.embedding_model.trim().is_empty() {
                return Err(ServerError::ConfigError("EMBEDDING_MODEL must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Whether the in-process vector store was requested
    pub fn uses_memory_store(&self) -> bool {
        self.vector_store_url.starts_with(MEMORY_STORE_PREFIX)
    }

    /// Embedding service settings derived from this configuration
    pub fn embedding_config(&self) -> EmbeddingServiceConfig {
        match self.embedding_provider {
            EmbeddingProvider::Http => EmbeddingServiceConfig::Http {
                endpoint: self.embedding_url.clone(),
                model: self.embedding_model.clone(),
                timeout_secs: self.request_timeout_secs,
            },
            EmbeddingProvider::Mock => EmbeddingServiceConfig::Mock {
                dimensions: self.embedding_dimensions,
            },
        }
    }

    /// `host:port` string the listener binds to
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ServerResult<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listen_address(), "127.0.0.1:8501");
        assert_eq!(config.vector_store_url, "http://localhost:8085");
        assert_eq!(
            config.embedding_config(),
            EmbeddingServiceConfig::Http {
                endpoint: "http://localhost:11434".to_string(),
                model: "nomic-embed-text".to_string(),
                timeout_secs: None,
            }
        );
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("SERVER_PORT", "9000"),
            ("VECTOR_STORE_URL", "memory://"),
            ("EMBEDDING_PROVIDER", "Mock"),
            ("EMBEDDING_DIMENSIONS", "32"),
            ("REQUEST_TIMEOUT_SECS", "10"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert!(config.uses_memory_store());
        assert_eq!(config.embedding_config(), EmbeddingServiceConfig::Mock { dimensions: 32 });
        assert_eq!(config.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_invalid_numbers_are_ignored() {
        let config = from_pairs(&[
            ("SERVER_PORT", "eighty"),
            ("EMBEDDING_DIMENSIONS", "0"),
            ("REQUEST_TIMEOUT_SECS", "-1"),
        ])
        .unwrap();

        assert_eq!(config.port, 8501);
        assert_eq!(config.embedding_dimensions, 384);
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let err = from_pairs(&[("EMBEDDING_PROVIDER", "openai")]).unwrap_err();
        assert!(matches!(err, ServerError::ConfigError(ref m) if m.contains("openai")));
    }

    #[test]
    fn test_empty_urls_are_config_errors() {
        assert!(matches!(
            from_pairs(&[("VECTOR_STORE_URL", "")]),
            Err(ServerError::ConfigError(_))
        ));
        assert!(matches!(
            from_pairs(&[("EMBEDDING_URL", " ")]),
            Err(ServerError::ConfigError(_))
        ));
        // The mock provider never contacts the model server
        assert!(from_pairs(&[("EMBEDDING_PROVIDER", "mock"), ("EMBEDDING_URL", "")]).is_ok());
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 8600}"#).unwrap();
        assert_eq!(config.port, 8600);
        assert_eq!(config.embedding_model, "nomic-embed-text");
    }
}
