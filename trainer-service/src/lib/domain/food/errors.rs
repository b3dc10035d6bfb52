use thiserror::Error;

/// Error for FoodName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FoodNameError {
    #[error("Food name must not be empty")]
    Empty,

    #[error("Food name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for macro-nutrient and quantity values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NutritionError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
}

/// Error for food log date ranges
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("'{param}' date parameter is required. Format: YYYY-MM-DD")]
    Missing { param: &'static str },

    #[error("Invalid '{param}' date format. Use YYYY-MM-DD")]
    InvalidFormat { param: &'static str },

    #[error("'to' date must not be before 'from' date")]
    Reversed,
}

/// Top-level error for food operations
#[derive(Debug, Clone, Error)]
pub enum FoodError {
    #[error("Invalid food name: {0}")]
    InvalidName(#[from] FoodNameError),

    #[error("Invalid nutrition values: {0}")]
    InvalidNutrition(#[from] NutritionError),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(#[from] DateRangeError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
