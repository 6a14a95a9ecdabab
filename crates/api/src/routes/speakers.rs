//! Speaker endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::speaker::{CreateSpeakerRequest, ListSpeakersQuery, UpdateSpeakerRequest};
use domain::models::Speaker;
use persistence::repositories::SpeakerRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;

fn speaker_not_found() -> ApiError {
    ApiError::NotFound("Speaker not found".to_string())
}

/// GET /api/v1/speakers?eventId=
pub async fn list_speakers(
    State(state): State<AppState>,
    Query(query): Query<ListSpeakersQuery>,
) -> Result<Json<Vec<Speaker>>, ApiError> {
    let repo = SpeakerRepository::new(state.pool.clone());
    let speakers = repo.list(query.event_id).await?;
    Ok(Json(speakers.into_iter().map(Into::into).collect()))
}

/// An unknown `eventId` surfaces as a foreign key violation (404).
///
/// POST /api/v1/admin/speakers
pub async fn create_speaker(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<CreateSpeakerRequest>,
) -> Result<(StatusCode, Json<Speaker>), ApiError> {
    request.validate()?;

    let repo = SpeakerRepository::new(state.pool.clone());
    let speaker: Speaker = repo.create(&request).await?.into();

    info!(speaker_id = %speaker.id, admin_id = %admin.user_id, "Speaker created");
    Ok((StatusCode::CREATED, Json(speaker)))
}

/// PUT /api/v1/admin/speakers/:id
pub async fn update_speaker(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSpeakerRequest>,
) -> Result<Json<Speaker>, ApiError> {
    request.validate()?;

    let repo = SpeakerRepository::new(state.pool.clone());
    let speaker: Speaker = repo
        .update(id, &request)
        .await?
        .ok_or_else(speaker_not_found)?
        .into();

    info!(speaker_id = %id, admin_id = %admin.user_id, "Speaker updated");
    Ok(Json(speaker))
}

/// DELETE /api/v1/admin/speakers/:id
pub async fn delete_speaker(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = SpeakerRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(speaker_not_found());
    }

    info!(speaker_id = %id, admin_id = %admin.user_id, "Speaker deleted");
    Ok(StatusCode::NO_CONTENT)
}
