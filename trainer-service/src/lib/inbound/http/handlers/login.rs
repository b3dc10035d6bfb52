use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::SessionToken;
use crate::inbound::http::router::AppState;

/// Exchange a username and password for a bearer token.
///
/// Unknown usernames and wrong passwords produce the same 401 response.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .user_service
        .login(body.into())
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, "Login successful", session.into()))
}

/// HTTP request body for login (raw JSON)
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl From<LoginRequest> for LoginCommand {
    fn from(body: LoginRequest) -> Self {
        LoginCommand {
            username: body.username,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}

impl From<SessionToken> for LoginResponseData {
    fn from(session: SessionToken) -> Self {
        Self {
            token: session.token,
        }
    }
}
