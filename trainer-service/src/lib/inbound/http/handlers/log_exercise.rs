use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::training::models::ExerciseEntry;
use crate::domain::training::models::LogExerciseCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::training::errors::TrainingError;

pub async fn log_exercise(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(body): ApiJson<LogExerciseRequest>,
) -> Result<ApiSuccess<LogExerciseResponseData>, ApiError> {
    let command = LogExerciseCommand::new(
        body.exercise_name,
        body.weight,
        body.sets,
        body.reps,
        body.rpe,
        body.notes,
    )
    .map_err(TrainingError::from)?;

    state
        .training_service
        .log_exercise(user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref exercise| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Exercise logged successfully",
                exercise.into(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogExerciseRequest {
    exercise_name: String,
    weight: f64,
    sets: i32,
    reps: i32,
    rpe: f64,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogExerciseResponseData {
    pub exercise: ExerciseData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseData {
    pub id: i64,
    pub exercise_name: String,
    pub weight: f64,
    pub sets: i32,
    pub reps: i32,
    pub rpe: f64,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl From<&ExerciseEntry> for LogExerciseResponseData {
    fn from(entry: &ExerciseEntry) -> Self {
        Self {
            exercise: ExerciseData {
                id: entry.id.0,
                exercise_name: entry.exercise_name.clone(),
                weight: entry.weight,
                sets: entry.sets,
                reps: entry.reps,
                rpe: entry.rpe,
                notes: entry.notes.clone(),
                logged_at: entry.logged_at,
            },
        }
    }
}
