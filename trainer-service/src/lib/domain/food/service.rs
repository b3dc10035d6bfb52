use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::food::errors::FoodError;
use crate::domain::food::models::CreateFoodItemCommand;
use crate::domain::food::models::DateRange;
use crate::domain::food::models::FoodItem;
use crate::domain::food::models::FoodLogEntry;
use crate::domain::food::models::LogFoodCommand;
use crate::domain::food::models::NewFoodItem;
use crate::domain::food::models::NewFoodLog;
use crate::domain::food::ports::FoodRepository;
use crate::domain::food::ports::FoodServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for food operations.
pub struct FoodService<FR>
where
    FR: FoodRepository,
{
    repository: Arc<FR>,
}

impl<FR> FoodService<FR>
where
    FR: FoodRepository,
{
    pub fn new(repository: Arc<FR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<FR> FoodServicePort for FoodService<FR>
where
    FR: FoodRepository,
{
    async fn create_food_item(
        &self,
        user_id: UserId,
        command: CreateFoodItemCommand,
    ) -> Result<FoodItem, FoodError> {
        let item = self
            .repository
            .create_food_item(NewFoodItem {
                user_id,
                name: command.name,
                per_100g: command.per_100g,
            })
            .await?;

        tracing::info!(user_id = %user_id, food_id = %item.id, "Food item created");

        Ok(item)
    }

    async fn log_food(
        &self,
        user_id: UserId,
        command: LogFoodCommand,
    ) -> Result<FoodLogEntry, FoodError> {
        let per_100g = command.per_100g();

        let item = self
            .repository
            .create_food_item(NewFoodItem {
                user_id,
                name: command.name,
                per_100g,
            })
            .await?;

        let entry = self
            .repository
            .log_food_item(NewFoodLog {
                user_id,
                food_id: item.id,
                total_grams: command.total_grams,
                consumed: command.consumed,
            })
            .await?;

        tracing::info!(user_id = %user_id, food_id = %item.id, log_id = %entry.id, "Food logged");

        Ok(entry)
    }

    async fn view_food(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<FoodLogEntry>, FoodError> {
        self.repository.view_food(user_id, range).await
    }
}
