//! Fixed catalog, sentinels and defaults

use crate::data::entities::Exercise;

/// Collection holding exercise records.
pub const EXERCISE_COLLECTION: &str = "Exercise";

/// Properties requested from similarity queries.
pub const EXERCISE_FIELDS: [&str; 2] = ["name", "description"];

/// Property whose presence marks the collection as populated.
pub const EXISTENCE_FIELD: &str = "name";

/// Lower threshold for flexible matching.
pub const DEFAULT_MIN_CERTAINTY: f32 = 0.5;

pub const EMPTY_GOAL_MESSAGE: &str = "Please enter a fitness goal.";

pub const FALLBACK_NAME: &str = "Walking";
pub const FALLBACK_DESCRIPTION: &str = "A basic cardio activity for all fitness levels.";

pub const ERROR_NAME: &str = "Error";
pub const ERROR_DESCRIPTION: &str = "An error occurred while retrieving data.";

/// Static nutrition lines shown with every plan.
pub const NUTRITION_FACTS: [&str; 2] = [
    "Protein: 112.64 calories, 25g protein",
    "Salad: 19.98 calories, 1.23g protein",
];

pub fn walking_fallback() -> Exercise {
    Exercise::new(FALLBACK_NAME, FALLBACK_DESCRIPTION)
}

pub fn error_sentinel() -> Exercise {
    Exercise::new(ERROR_NAME, ERROR_DESCRIPTION)
}

/// Records inserted by the seeder into an empty collection.
pub fn default_catalog() -> Vec<Exercise> {
    vec![
        Exercise::new("Push-ups", "A basic upper-body strength exercise."),
        Exercise::new("Squats", "A lower-body strength exercise."),
        Exercise::new("Jogging", "A cardio activity to improve endurance."),
    ]
}
