//! Authentication service for registration, login and profile lookup.

use domain::models::user::{AuthResponse, LoginRequest, RegisterRequest};
use domain::models::{User, UserRole};
use persistence::entities::UserRoleDb;
use persistence::repositories::UserRepository;
use shared::jwt::{JwtConfig, JwtError};
use shared::password::{check_password_policy, hash_password, verify_password, PasswordError};
use shared::validation::normalize_email;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => ApiError::Conflict(err.to_string()),
            AuthError::WeakPassword(msg) => ApiError::Validation(msg),
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::UserNotFound => ApiError::NotFound(err.to_string()),
            AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
            AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
            AuthError::DatabaseError(e) => e.into(),
        }
    }
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_config,
        }
    }

    /// Registers a new account with role `user` and signs it in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        check_password_policy(&request.password).map_err(AuthError::WeakPassword)?;

        let email = normalize_email(&request.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&request.password)?;
        let entity = self
            .users
            .create_user(request.name.trim(), &email, &password_hash, UserRoleDb::User)
            .await
            .map_err(|e| match &e {
                // Lost a race against a concurrent registration.
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                    AuthError::EmailAlreadyExists
                }
                _ => AuthError::DatabaseError(e),
            })?;

        info!(user_id = %entity.id, "User registered");
        self.issue(entity.into())
    }

    /// Verifies credentials. Unknown emails and wrong passwords fail alike.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        let email = normalize_email(&request.email);
        let entity = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &entity.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %entity.id, "User logged in");
        self.issue(entity.into())
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(Into::into)
            .ok_or(AuthError::UserNotFound)
    }

    fn issue(&self, user: User) -> Result<AuthResponse, AuthError> {
        let (token, _jti) = self.jwt_config.generate_token(user.id, user.role.as_str())?;
        Ok(AuthResponse {
            user,
            token,
            expires_in: self.jwt_config.expiry_secs,
        })
    }
}

/// Role carried in a token, defaulting to the least privileged one.
pub fn role_from_claim(role: &str) -> UserRole {
    role.parse().unwrap_or(UserRole::User)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_auth_error_status_codes() {
        let cases = [
            (AuthError::EmailAlreadyExists, StatusCode::CONFLICT),
            (
                AuthError::WeakPassword("too short".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::UserNotFound, StatusCode::NOT_FOUND),
            (AuthError::TokenError(JwtError::InvalidToken), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_role_from_claim() {
        assert_eq!(role_from_claim("admin"), UserRole::Admin);
        assert_eq!(role_from_claim("user"), UserRole::User);
        assert_eq!(role_from_claim("superuser"), UserRole::User);
    }
}
