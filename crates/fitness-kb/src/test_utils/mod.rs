//! Test doubles shared by this crate's tests and downstream crates

pub mod fakes;

#[cfg(feature = "mocks")]
pub mod mocks;

pub use fakes::{FakeEmbeddingService, FakeVectorStore, RecordedInsert, RecordedQuery};

#[cfg(feature = "mocks")]
pub use mocks::MockEmbeddingGenerator;
