//! Bearer JWT extractors.
//!
//! `AuthUser` accepts any valid access token; `AdminUser` additionally
//! requires the `admin` role. Handlers take one of these as an argument and
//! never read the Authorization header themselves.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::UserRole;
use shared::jwt::{extract_user_id, JwtConfig, JwtError};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::auth::role_from_claim;

/// Authenticated caller from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    pub role: UserRole,
    /// JWT ID (jti).
    pub jti: String,
}

impl AuthUser {
    /// Validates a raw token.
    pub fn from_token(jwt: &JwtConfig, token: &str) -> Result<Self, ApiError> {
        let claims = jwt.validate_token(token).map_err(|e| match e {
            JwtError::TokenExpired => ApiError::Unauthorized("Token has expired".to_string()),
            _ => ApiError::Unauthorized("Invalid or expired token".to_string()),
        })?;

        let user_id = extract_user_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(Self {
            user_id,
            role: role_from_claim(&claims.role),
            jti: claims.jti,
        })
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<AuthUser>() {
            return Ok(auth.clone());
        }

        let auth = AuthUser::from_token(&state.jwt, bearer_token(parts)?)?;
        parts.extensions.insert(auth.clone());
        Ok(auth)
    }
}

/// Authenticated caller with role `admin`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if !auth.role.is_admin() {
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(auth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn jwt() -> JwtConfig {
        JwtConfig::from_secret("extractor-test-secret", 3600, 0).unwrap()
    }

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        assert!(matches!(
            bearer_token(&parts_with(None)),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&parts_with(Some("Basic dXNlcjpwYXNz"))),
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&parts_with(Some("Bearer "))),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_from_token() {
        let jwt = jwt();
        let user_id = Uuid::new_v4();
        let (token, jti) = jwt.generate_token(user_id, "admin").unwrap();

        let auth = AuthUser::from_token(&jwt, &token).unwrap();
        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.role, UserRole::Admin);
        assert_eq!(auth.jti, jti);
    }

    #[test]
    fn test_from_token_rejects_foreign_signature() {
        let other = JwtConfig::from_secret("someone-else", 3600, 0).unwrap();
        let (token, _) = other.generate_token(Uuid::new_v4(), "admin").unwrap();
        assert!(matches!(
            AuthUser::from_token(&jwt(), &token),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
