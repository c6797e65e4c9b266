//! Core traits (interfaces) for the exercise knowledge base

mod embedding_generator;
pub mod vector_store;

pub use embedding_generator::EmbeddingGenerator;
pub use vector_store::VectorStore;
