//! Authentication endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::user::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::services::AuthService;

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.pool.clone(), (*state.jwt).clone())
}

/// Register a new account.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;
    let response = auth_service(&state).register(&request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Sign in with email and password.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;
    let response = auth_service(&state).login(&request).await?;
    Ok(Json(response))
}

/// Current caller's account.
///
/// GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = auth_service(&state).profile(auth.user_id).await?;
    Ok(Json(ProfileResponse { user }))
}
