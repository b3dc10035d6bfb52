use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::SessionToken;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration and login.
///
/// Argon2 work runs on the blocking pool. If the request is dropped while a
/// hash is in flight, the result is discarded and nothing reaches the store.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Shared hasher and token signer
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
                .await
                .map_err(|e| UserError::HashingFailed(e.to_string()))?
                .map_err(|e| UserError::HashingFailed(e.to_string()))?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<SessionToken, UserError> {
        // A name that fails validation can never have been registered.
        let Ok(username) = Username::new(command.username) else {
            return Err(UserError::InvalidCredentials);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Login rejected: unknown username");
            // Same Argon2 cost as a wrong password.
            tokio::task::spawn_blocking(move || authenticator.reject_unknown_subject(&password))
                .await
                .map_err(|e| UserError::Unknown(e.to_string()))?;
            return Err(UserError::InvalidCredentials);
        };

        let stored_hash = user.password_hash;
        let user_id = user.id;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, user_id)
        })
        .await
        .map_err(|e| UserError::Unknown(e.to_string()))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::debug!(user_id = %user_id, "Login rejected: password mismatch");
                UserError::InvalidCredentials
            }
            AuthenticationError::PasswordError(err) => UserError::HashingFailed(err.to_string()),
            AuthenticationError::JwtError(err) => UserError::TokenIssuanceFailed(err.to_string()),
        })?;

        let expires_at = DateTime::<Utc>::from_timestamp(result.expires_at, 0).ok_or_else(|| {
            UserError::TokenIssuanceFailed(format!("expiry out of range: {}", result.expires_at))
        })?;

        tracing::info!(user_id = %user_id, "User logged in");

        Ok(SessionToken {
            token: result.access_token,
            expires_at,
        })
    }
}
