use async_trait::async_trait;

use crate::domain::training::errors::TrainingError;
use crate::domain::training::models::ExerciseEntry;
use crate::domain::training::models::LogExerciseCommand;
use crate::domain::training::models::NewExerciseEntry;
use crate::domain::user::models::UserId;

/// Port for training domain service operations.
#[async_trait]
pub trait TrainingServicePort: Send + Sync + 'static {
    /// Log an exercise for `user_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn log_exercise(
        &self,
        user_id: UserId,
        command: LogExerciseCommand,
    ) -> Result<ExerciseEntry, TrainingError>;
}

/// Persistence operations for the training log.
#[async_trait]
pub trait TrainingRepository: Send + Sync + 'static {
    async fn log_exercise(&self, entry: NewExerciseEntry) -> Result<ExerciseEntry, TrainingError>;
}
