use thiserror::Error;

/// Error for exercise entry validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExerciseError {
    #[error("Exercise name must not be empty")]
    EmptyName,

    #[error("Exercise name too long: maximum {max} characters, got {actual}")]
    NameTooLong { max: usize, actual: usize },

    #[error("Weight must be a finite, non-negative number")]
    InvalidWeight,

    #[error("{field} must be at least 1")]
    NotPositive { field: &'static str },

    #[error("RPE must be between {min} and {max}")]
    RpeOutOfRange { min: u8, max: u8 },
}

/// Top-level error for training operations
#[derive(Debug, Clone, Error)]
pub enum TrainingError {
    #[error("Invalid exercise: {0}")]
    InvalidExercise(#[from] ExerciseError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
