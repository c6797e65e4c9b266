//! Adapter implementations for external services

pub mod weaviate_store;

pub use weaviate_store::{WeaviateConfig, WeaviateStore, DEFAULT_WEAVIATE_URL};
