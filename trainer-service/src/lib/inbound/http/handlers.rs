use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::food::errors::FoodError;
use crate::training::errors::TrainingError;
use crate::user::errors::UserError;

pub mod create_food_item;
pub mod log_exercise;
pub mod log_food;
pub mod login;
pub mod register;
pub mod view_food;

/// Message shared by "unknown username" and "wrong password".
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// JSON body extractor whose rejection is an `ApiError`, so malformed bodies
/// still get the `{message, success}` envelope.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with an `ApiError` rejection.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody::new(message))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest("Invalid request body".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected query string");
        ApiError::BadRequest("Invalid query parameters".to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_) | UserError::InvalidPassword(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            // Reported like any other store failure; see DESIGN.md.
            UserError::UsernameAlreadyExists(_) | UserError::DatabaseError(_) => {
                tracing::error!(error = %err, "User store operation failed");
                ApiError::InternalServerError("Database error".to_string())
            }
            UserError::HashingFailed(_) => {
                tracing::error!(error = %err, "Password hashing failed");
                ApiError::InternalServerError("Failed to hash password".to_string())
            }
            UserError::TokenIssuanceFailed(_) => {
                tracing::error!(error = %err, "Token issuance failed");
                ApiError::InternalServerError(
                    "Failed to generate authentication token".to_string(),
                )
            }
            UserError::Unknown(_) => {
                tracing::error!(error = %err, "Unexpected user error");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<FoodError> for ApiError {
    fn from(err: FoodError) -> Self {
        match err {
            FoodError::InvalidName(_) | FoodError::InvalidNutrition(_) => {
                ApiError::BadRequest(err.to_string())
            }
            // Date problems are reported as-is, without the wrapper prefix.
            FoodError::InvalidDateRange(inner) => ApiError::BadRequest(inner.to_string()),
            FoodError::DatabaseError(_) => {
                tracing::error!(error = %err, "Food store operation failed");
                ApiError::InternalServerError("Database error".to_string())
            }
        }
    }
}

impl From<TrainingError> for ApiError {
    fn from(err: TrainingError) -> Self {
        match err {
            TrainingError::InvalidExercise(_) => ApiError::BadRequest(err.to_string()),
            TrainingError::DatabaseError(_) => {
                tracing::error!(error = %err, "Training store operation failed");
                ApiError::InternalServerError("Database error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    message: String,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    success: bool,
    message: String,
}

impl ApiErrorBody {
    pub fn new(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}
