use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::food::errors::FoodError;
use crate::domain::food::models::DateRange;
use crate::domain::food::models::FoodItem;
use crate::domain::food::models::FoodItemId;
use crate::domain::food::models::FoodLogEntry;
use crate::domain::food::models::FoodLogId;
use crate::domain::food::models::FoodName;
use crate::domain::food::models::NewFoodItem;
use crate::domain::food::models::NewFoodLog;
use crate::domain::food::models::Nutrition;
use crate::domain::food::ports::FoodRepository;
use crate::domain::user::models::UserId;

pub struct PostgresFoodRepository {
    pool: PgPool,
}

impl PostgresFoodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FoodItemRow {
    id: i64,
    user_id: i64,
    food_name: String,
    calories_100: f64,
    protein_100: f64,
    carbs_100: f64,
    fats_100: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<FoodItemRow> for FoodItem {
    type Error = FoodError;

    fn try_from(row: FoodItemRow) -> Result<Self, Self::Error> {
        Ok(FoodItem {
            id: FoodItemId(row.id),
            user_id: UserId(row.user_id),
            name: FoodName::new(row.food_name)?,
            per_100g: Nutrition::new(
                row.calories_100,
                row.protein_100,
                row.carbs_100,
                row.fats_100,
            )?,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct FoodLogRow {
    id: i64,
    user_id: i64,
    food_id: i64,
    food_name: String,
    total_grams: f64,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    logged_at: DateTime<Utc>,
}

impl TryFrom<FoodLogRow> for FoodLogEntry {
    type Error = FoodError;

    fn try_from(row: FoodLogRow) -> Result<Self, Self::Error> {
        Ok(FoodLogEntry {
            id: FoodLogId(row.id),
            user_id: UserId(row.user_id),
            food_id: FoodItemId(row.food_id),
            food_name: row.food_name,
            total_grams: row.total_grams,
            consumed: Nutrition::new(row.calories, row.protein, row.carbs, row.fats)?,
            logged_at: row.logged_at,
        })
    }
}

#[async_trait]
impl FoodRepository for PostgresFoodRepository {
    async fn create_food_item(&self, item: NewFoodItem) -> Result<FoodItem, FoodError> {
        let row = sqlx::query_as::<_, FoodItemRow>(
            r#"
            INSERT INTO food_items (user_id, food_name, calories_100, protein_100, carbs_100, fats_100)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, food_name, calories_100, protein_100, carbs_100, fats_100, created_at
            "#,
        )
        .bind(item.user_id.0)
        .bind(item.name.as_str())
        .bind(item.per_100g.calories())
        .bind(item.per_100g.protein())
        .bind(item.per_100g.carbs())
        .bind(item.per_100g.fats())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| FoodError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn log_food_item(&self, entry: NewFoodLog) -> Result<FoodLogEntry, FoodError> {
        let row = sqlx::query_as::<_, FoodLogRow>(
            r#"
            WITH inserted AS (
                INSERT INTO food_logs (user_id, food_id, total_grams, calories, protein, carbs, fats)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, user_id, food_id, total_grams, calories, protein, carbs, fats, logged_at
            )
            SELECT inserted.id, inserted.user_id, inserted.food_id, food_items.food_name,
                   inserted.total_grams, inserted.calories, inserted.protein, inserted.carbs,
                   inserted.fats, inserted.logged_at
            FROM inserted
            JOIN food_items ON food_items.id = inserted.food_id
            "#,
        )
        .bind(entry.user_id.0)
        .bind(entry.food_id.0)
        .bind(entry.total_grams)
        .bind(entry.consumed.calories())
        .bind(entry.consumed.protein())
        .bind(entry.consumed.carbs())
        .bind(entry.consumed.fats())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| FoodError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn view_food(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<FoodLogEntry>, FoodError> {
        let rows = sqlx::query_as::<_, FoodLogRow>(
            r#"
            SELECT food_logs.id, food_logs.user_id, food_logs.food_id, food_items.food_name,
                   food_logs.total_grams, food_logs.calories, food_logs.protein, food_logs.carbs,
                   food_logs.fats, food_logs.logged_at
            FROM food_logs
            JOIN food_items ON food_items.id = food_logs.food_id
            WHERE food_logs.user_id = $1
              AND food_logs.logged_at >= $2
              AND food_logs.logged_at < $3
            ORDER BY food_logs.logged_at ASC
            "#,
        )
        .bind(user_id.0)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FoodError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(FoodLogEntry::try_from).collect()
    }
}
