use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::food::models::FoodLogEntry;
use crate::domain::food::models::FoodName;
use crate::domain::food::models::LogFoodCommand;
use crate::domain::food::models::Nutrition;
use crate::food::errors::FoodError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn log_food(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(body): ApiJson<LogFoodRequest>,
) -> Result<ApiSuccess<LogFoodResponseData>, ApiError> {
    state
        .food_service
        .log_food(user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref entry| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Food logged successfully",
                LogFoodResponseData {
                    entry: entry.into(),
                },
            )
        })
}

/// Consumed portion with the totals actually eaten (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogFoodRequest {
    food_name: String,
    total_grams: f64,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
}

impl LogFoodRequest {
    fn try_into_command(self) -> Result<LogFoodCommand, FoodError> {
        let name = FoodName::new(self.food_name)?;
        let consumed = Nutrition::new(self.calories, self.protein, self.carbs, self.fats)?;
        Ok(LogFoodCommand::new(name, self.total_grams, consumed)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogFoodResponseData {
    pub entry: FoodLogEntryData,
}

/// Log entry as returned by both the log and view endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodLogEntryData {
    pub id: i64,
    pub food_id: i64,
    pub food_name: String,
    pub total_grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub logged_at: DateTime<Utc>,
}

impl From<&FoodLogEntry> for FoodLogEntryData {
    fn from(entry: &FoodLogEntry) -> Self {
        Self {
            id: entry.id.0,
            food_id: entry.food_id.0,
            food_name: entry.food_name.clone(),
            total_grams: entry.total_grams,
            calories: entry.consumed.calories(),
            protein: entry.consumed.protein(),
            carbs: entry.consumed.carbs(),
            fats: entry.consumed.fats(),
            logged_at: entry.logged_at,
        }
    }
}
