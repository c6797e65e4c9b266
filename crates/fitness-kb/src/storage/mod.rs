//! Storage backends that live inside the process

pub mod memory;

pub use memory::{certainty, InMemoryVectorStore};
