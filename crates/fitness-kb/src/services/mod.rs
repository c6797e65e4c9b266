//! Core services for the exercise knowledge base

pub mod encoder;
pub mod recommender;
pub mod seeder;

// Re-exports
pub use encoder::GoalEncoder;
pub use recommender::ExerciseRecommender;
pub use seeder::DataSeeder;
