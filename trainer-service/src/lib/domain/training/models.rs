use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::training::errors::ExerciseError;
use crate::domain::user::models::UserId;

/// Logged exercise set block.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub id: ExerciseEntryId,
    pub user_id: UserId,
    pub exercise_name: String,
    pub weight: f64,
    pub sets: i32,
    pub reps: i32,
    pub rpe: f64,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExerciseEntryId(pub i64);

impl fmt::Display for ExerciseEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to log an exercise with validated fields
#[derive(Debug, Clone)]
pub struct LogExerciseCommand {
    pub exercise_name: String,
    pub weight: f64,
    pub sets: i32,
    pub reps: i32,
    pub rpe: f64,
    pub notes: Option<String>,
}

impl LogExerciseCommand {
    const MAX_NAME_LENGTH: usize = 100;
    const MIN_RPE: u8 = 0;
    const MAX_RPE: u8 = 10;

    /// Validate and build the command.
    ///
    /// Blank notes are stored as no notes.
    pub fn new(
        exercise_name: String,
        weight: f64,
        sets: i32,
        reps: i32,
        rpe: f64,
        notes: Option<String>,
    ) -> Result<Self, ExerciseError> {
        let exercise_name = exercise_name.trim().to_string();
        let length = exercise_name.chars().count();
        if length == 0 {
            return Err(ExerciseError::EmptyName);
        }
        if length > Self::MAX_NAME_LENGTH {
            return Err(ExerciseError::NameTooLong {
                max: Self::MAX_NAME_LENGTH,
                actual: length,
            });
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(ExerciseError::InvalidWeight);
        }
        if sets < 1 {
            return Err(ExerciseError::NotPositive { field: "sets" });
        }
        if reps < 1 {
            return Err(ExerciseError::NotPositive { field: "reps" });
        }
        if !(f64::from(Self::MIN_RPE)..=f64::from(Self::MAX_RPE)).contains(&rpe) {
            return Err(ExerciseError::RpeOutOfRange {
                min: Self::MIN_RPE,
                max: Self::MAX_RPE,
            });
        }

        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            exercise_name,
            weight,
            sets,
            reps,
            rpe,
            notes,
        })
    }
}

/// Exercise entry to persist
#[derive(Debug, Clone)]
pub struct NewExerciseEntry {
    pub user_id: UserId,
    pub command: LogExerciseCommand,
}
