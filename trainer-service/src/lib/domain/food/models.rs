use std::fmt;

use chrono::DateTime;
use chrono::Days;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;

use crate::domain::food::errors::DateRangeError;
use crate::domain::food::errors::FoodNameError;
use crate::domain::food::errors::NutritionError;
use crate::domain::user::models::UserId;

/// Food item with nutrition normalised to 100 g.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub id: FoodItemId,
    pub user_id: UserId,
    pub name: FoodName,
    pub per_100g: Nutrition,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoodItemId(pub i64);

impl fmt::Display for FoodItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoodLogId(pub i64);

impl fmt::Display for FoodLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Food name value type (1-100 characters, surrounding whitespace trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodName(String);

impl FoodName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, FoodNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(FoodNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(FoodNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FoodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Energy (kcal) and macro-nutrients (g). Every value is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutrition {
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
}

impl Nutrition {
    pub fn new(calories: f64, protein: f64, carbs: f64, fats: f64) -> Result<Self, NutritionError> {
        Ok(Self {
            calories: non_negative("calories", calories)?,
            protein: non_negative("protein", protein)?,
            carbs: non_negative("carbs", carbs)?,
            fats: non_negative("fats", fats)?,
        })
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }

    pub fn protein(&self) -> f64 {
        self.protein
    }

    pub fn carbs(&self) -> f64 {
        self.carbs
    }

    pub fn fats(&self) -> f64 {
        self.fats
    }

    fn scaled(&self, factor: f64) -> Result<Self, NutritionError> {
        Self::new(
            self.calories * factor,
            self.protein * factor,
            self.carbs * factor,
            self.fats * factor,
        )
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, NutritionError> {
    if !value.is_finite() {
        Err(NutritionError::NotFinite { field })
    } else if value < 0.0 {
        Err(NutritionError::Negative { field })
    } else {
        Ok(value)
    }
}

/// Command to create a food item from per-100 g values
#[derive(Debug, Clone)]
pub struct CreateFoodItemCommand {
    pub name: FoodName,
    pub per_100g: Nutrition,
}

/// Command to log a consumed portion.
///
/// `consumed` holds the totals for the whole portion of `total_grams`.
#[derive(Debug, Clone)]
pub struct LogFoodCommand {
    pub name: FoodName,
    pub total_grams: f64,
    pub consumed: Nutrition,
    per_100g: Nutrition,
}

impl LogFoodCommand {
    /// # Errors
    /// * `NotPositive` / `NotFinite` - `total_grams` is not a positive number
    /// * `NotFinite` - the per-100 g values overflow (portion too small for its totals)
    pub fn new(
        name: FoodName,
        total_grams: f64,
        consumed: Nutrition,
    ) -> Result<Self, NutritionError> {
        if !total_grams.is_finite() {
            return Err(NutritionError::NotFinite {
                field: "total_grams",
            });
        }
        if total_grams <= 0.0 {
            return Err(NutritionError::NotPositive {
                field: "total_grams",
            });
        }

        let per_100g = consumed.scaled(100.0 / total_grams)?;

        Ok(Self {
            name,
            total_grams,
            consumed,
            per_100g,
        })
    }

    /// Nutrition of this food normalised to 100 g.
    pub fn per_100g(&self) -> Nutrition {
        self.per_100g
    }
}

/// Food item to persist
#[derive(Debug, Clone)]
pub struct NewFoodItem {
    pub user_id: UserId,
    pub name: FoodName,
    pub per_100g: Nutrition,
}

/// Food log entry to persist
#[derive(Debug, Clone)]
pub struct NewFoodLog {
    pub user_id: UserId,
    pub food_id: FoodItemId,
    pub total_grams: f64,
    pub consumed: Nutrition,
}

/// Logged portion of food
#[derive(Debug, Clone, PartialEq)]
pub struct FoodLogEntry {
    pub id: FoodLogId,
    pub user_id: UserId,
    pub food_id: FoodItemId,
    pub food_name: String,
    pub total_grams: f64,
    pub consumed: Nutrition,
    pub logged_at: DateTime<Utc>,
}

/// Inclusive range of calendar days (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DateRangeError> {
        if to < from {
            return Err(DateRangeError::Reversed);
        }
        Ok(Self { from, to })
    }

    /// Parse `from`/`to` query values in `YYYY-MM-DD` form.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, DateRangeError> {
        let from = parse_date("from", from)?;
        let to = parse_date("to", to)?;
        Self::new(from, to)
    }

    /// First instant of the range.
    pub fn start(&self) -> DateTime<Utc> {
        self.from.and_time(NaiveTime::MIN).and_utc()
    }

    /// First instant after the range (midnight following `to`).
    pub fn end(&self) -> DateTime<Utc> {
        self.to
            .checked_add_days(Days::new(1))
            .unwrap_or(NaiveDate::MAX)
            .and_time(NaiveTime::MIN)
            .and_utc()
    }
}

fn parse_date(param: &'static str, value: Option<&str>) -> Result<NaiveDate, DateRangeError> {
    match value.map(str::trim) {
        None | Some("") => Err(DateRangeError::Missing { param }),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| DateRangeError::InvalidFormat { param }),
    }
}
