use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::training::errors::TrainingError;
use crate::domain::training::models::ExerciseEntry;
use crate::domain::training::models::LogExerciseCommand;
use crate::domain::training::models::NewExerciseEntry;
use crate::domain::training::ports::TrainingRepository;
use crate::domain::training::ports::TrainingServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for training operations.
pub struct TrainingService<TR>
where
    TR: TrainingRepository,
{
    repository: Arc<TR>,
}

impl<TR> TrainingService<TR>
where
    TR: TrainingRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TrainingServicePort for TrainingService<TR>
where
    TR: TrainingRepository,
{
    async fn log_exercise(
        &self,
        user_id: UserId,
        command: LogExerciseCommand,
    ) -> Result<ExerciseEntry, TrainingError> {
        let entry = self
            .repository
            .log_exercise(NewExerciseEntry { user_id, command })
            .await?;

        tracing::info!(
            user_id = %user_id,
            entry_id = %entry.id,
            exercise = %entry.exercise_name,
            "Exercise logged"
        );

        Ok(entry)
    }
}
