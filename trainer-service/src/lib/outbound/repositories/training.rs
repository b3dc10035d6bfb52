use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::training::errors::TrainingError;
use crate::domain::training::models::ExerciseEntry;
use crate::domain::training::models::ExerciseEntryId;
use crate::domain::training::models::NewExerciseEntry;
use crate::domain::training::ports::TrainingRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTrainingRepository {
    pool: PgPool,
}

impl PostgresTrainingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ExerciseRow {
    id: i64,
    user_id: i64,
    exercise_name: String,
    weight: f64,
    sets: i32,
    reps: i32,
    rpe: f64,
    notes: Option<String>,
    logged_at: DateTime<Utc>,
}

impl From<ExerciseRow> for ExerciseEntry {
    fn from(row: ExerciseRow) -> Self {
        ExerciseEntry {
            id: ExerciseEntryId(row.id),
            user_id: UserId(row.user_id),
            exercise_name: row.exercise_name,
            weight: row.weight,
            sets: row.sets,
            reps: row.reps,
            rpe: row.rpe,
            notes: row.notes,
            logged_at: row.logged_at,
        }
    }
}

#[async_trait]
impl TrainingRepository for PostgresTrainingRepository {
    async fn log_exercise(&self, entry: NewExerciseEntry) -> Result<ExerciseEntry, TrainingError> {
        let command = entry.command;

        sqlx::query_as::<_, ExerciseRow>(
            r#"
            INSERT INTO exercise_logs (user_id, exercise_name, weight, sets, reps, rpe, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, exercise_name, weight, sets, reps, rpe, notes, logged_at
            "#,
        )
        .bind(entry.user_id.0)
        .bind(&command.exercise_name)
        .bind(command.weight)
        .bind(command.sets)
        .bind(command.reps)
        .bind(command.rpe)
        .bind(&command.notes)
        .fetch_one(&self.pool)
        .await
        .map(ExerciseEntry::from)
        .map_err(|e| TrainingError::DatabaseError(e.to_string()))
    }
}
