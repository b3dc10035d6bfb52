use async_trait::async_trait;

use crate::domain::food::errors::FoodError;
use crate::domain::food::models::CreateFoodItemCommand;
use crate::domain::food::models::DateRange;
use crate::domain::food::models::FoodItem;
use crate::domain::food::models::FoodLogEntry;
use crate::domain::food::models::LogFoodCommand;
use crate::domain::food::models::NewFoodItem;
use crate::domain::food::models::NewFoodLog;
use crate::domain::user::models::UserId;

/// Port for food domain service operations.
#[async_trait]
pub trait FoodServicePort: Send + Sync + 'static {
    /// Create a food item owned by `user_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_food_item(
        &self,
        user_id: UserId,
        command: CreateFoodItemCommand,
    ) -> Result<FoodItem, FoodError>;

    /// Log a consumed portion.
    ///
    /// Stores the food normalised to 100 g, then the log entry referencing it.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn log_food(
        &self,
        user_id: UserId,
        command: LogFoodCommand,
    ) -> Result<FoodLogEntry, FoodError>;

    /// List the user's log entries within `range`, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn view_food(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<FoodLogEntry>, FoodError>;
}

/// Persistence operations for food items and food log.
#[async_trait]
pub trait FoodRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_food_item(&self, item: NewFoodItem) -> Result<FoodItem, FoodError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed (including unknown food id)
    async fn log_food_item(&self, entry: NewFoodLog) -> Result<FoodLogEntry, FoodError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn view_food(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<FoodLogEntry>, FoodError>;
}
