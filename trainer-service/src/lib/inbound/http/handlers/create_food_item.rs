use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::food::models::CreateFoodItemCommand;
use crate::domain::food::models::FoodItem;
use crate::domain::food::models::FoodName;
use crate::domain::food::models::Nutrition;
use crate::food::errors::FoodError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_food_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(body): ApiJson<CreateFoodItemRequest>,
) -> Result<ApiSuccess<CreateFoodItemResponseData>, ApiError> {
    state
        .food_service
        .create_food_item(user.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref item| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "Food item created successfully",
                item.into(),
            )
        })
}

/// Per-100 g values of a food (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateFoodItemRequest {
    food_name: String,
    calories_100: f64,
    protein_100: f64,
    carbs_100: f64,
    fats_100: f64,
}

impl CreateFoodItemRequest {
    fn try_into_command(self) -> Result<CreateFoodItemCommand, FoodError> {
        Ok(CreateFoodItemCommand {
            name: FoodName::new(self.food_name)?,
            per_100g: Nutrition::new(
                self.calories_100,
                self.protein_100,
                self.carbs_100,
                self.fats_100,
            )?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateFoodItemResponseData {
    pub food: FoodItemData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodItemData {
    pub id: i64,
    pub user_id: i64,
    pub food_name: String,
    pub calories_100: f64,
    pub protein_100: f64,
    pub carbs_100: f64,
    pub fats_100: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&FoodItem> for CreateFoodItemResponseData {
    fn from(item: &FoodItem) -> Self {
        Self {
            food: FoodItemData {
                id: item.id.0,
                user_id: item.user_id.0,
                food_name: item.name.as_str().to_string(),
                calories_100: item.per_100g.calories(),
                protein_100: item.per_100g.protein(),
                carbs_100: item.per_100g.carbs(),
                fats_100: item.per_100g.fats(),
                created_at: item.created_at,
            },
        }
    }
}
