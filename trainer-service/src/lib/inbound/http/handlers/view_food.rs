use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::log_food::FoodLogEntryData;
use super::ApiError;
use super::ApiQuery;
use super::ApiSuccess;
use crate::domain::food::models::DateRange;
use crate::food::errors::FoodError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// List the caller's food log between two calendar dates, both inclusive.
pub async fn view_food(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(params): ApiQuery<ViewFoodParams>,
) -> Result<ApiSuccess<ViewFoodResponseData>, ApiError> {
    let range = DateRange::parse(params.from.as_deref(), params.to.as_deref())
        .map_err(FoodError::from)?;

    state
        .food_service
        .view_food(user.user_id, range)
        .await
        .map_err(ApiError::from)
        .map(|entries| {
            ApiSuccess::new(
                StatusCode::OK,
                "Food entries retrieved successfully",
                ViewFoodResponseData {
                    foods: entries.iter().map(FoodLogEntryData::from).collect(),
                },
            )
        })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewFoodParams {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewFoodResponseData {
    pub foods: Vec<FoodLogEntryData>,
}
