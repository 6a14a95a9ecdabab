//! Event endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::event::{CreateEventRequest, UpdateEventRequest};
use domain::models::Event;
use persistence::repositories::EventRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;

fn event_not_found() -> ApiError {
    ApiError::NotFound("Event not found".to_string())
}

/// Published events, soonest first.
///
/// GET /api/v1/events
pub async fn list_published_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let events = repo.list(true).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// One published event. Drafts are hidden from the public.
///
/// GET /api/v1/events/:id
pub async fn get_published_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let event = repo
        .find_by_id(id)
        .await?
        .filter(|e| e.is_published)
        .ok_or_else(event_not_found)?;
    Ok(Json(event.into()))
}

/// All events including drafts.
///
/// GET /api/v1/admin/events
pub async fn list_all_events(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<Event>>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let events = repo.list(false).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    request.validate()?;

    let repo = EventRepository::new(state.pool.clone());
    let event: Event = repo.create(&request).await?.into();

    info!(event_id = %event.id, admin_id = %admin.user_id, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/v1/admin/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    request.validate()?;

    let repo = EventRepository::new(state.pool.clone());
    let event: Event = repo
        .update(id, &request)
        .await?
        .ok_or_else(event_not_found)?
        .into();

    info!(event_id = %id, admin_id = %admin.user_id, "Event updated");
    Ok(Json(event))
}

/// Deletes the event and its registrations.
///
/// DELETE /api/v1/admin/events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(event_not_found());
    }

    info!(event_id = %id, admin_id = %admin.user_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
