//! Team member endpoint handlers.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use domain::models::team_member::{
    CreateTeamMemberRequest, ListTeamQuery, UpdateTeamMemberRequest, VisibilityResponse,
};
use domain::models::TeamMember;
use persistence::repositories::TeamMemberRepository;
use shared::pagination::Paginated;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::routes::attendees::multipart_error;
use crate::services::spreadsheet::{self, XLSX_CONTENT_TYPE};

/// Multipart field carrying the portrait.
const IMAGE_FIELD: &str = "image";

fn member_not_found() -> ApiError {
    ApiError::NotFound("Team member not found".to_string())
}

/// Visible members in display order.
///
/// GET /api/v1/team
pub async fn list_visible_team(
    State(state): State<AppState>,
) -> Result<Json<Vec<TeamMember>>, ApiError> {
    let repo = TeamMemberRepository::new(state.pool.clone());
    let members = repo.list_visible().await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/admin/team
pub async fn list_team(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListTeamQuery>,
) -> Result<Json<Paginated<TeamMember>>, ApiError> {
    let params = query.page_params();
    let department = query
        .department
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let repo = TeamMemberRepository::new(state.pool.clone());
    let members = repo
        .list(department, params.limit(), params.offset())
        .await?;
    let total = repo.count(department).await?;

    let data = members.into_iter().map(Into::into).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// GET /api/v1/admin/team/:id
pub async fn get_team_member(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamMember>, ApiError> {
    let repo = TeamMemberRepository::new(state.pool.clone());
    let member = repo.find_by_id(id).await?.ok_or_else(member_not_found)?;
    Ok(Json(member.into()))
}

/// POST /api/v1/admin/team
pub async fn create_team_member(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<CreateTeamMemberRequest>,
) -> Result<(StatusCode, Json<TeamMember>), ApiError> {
    request.validate()?;

    let repo = TeamMemberRepository::new(state.pool.clone());
    let member: TeamMember = repo.create(&request).await?.into();

    info!(member_id = %member.id, admin_id = %admin.user_id, "Team member created");
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/v1/admin/team/:id
pub async fn update_team_member(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTeamMemberRequest>,
) -> Result<Json<TeamMember>, ApiError> {
    request.validate()?;

    let repo = TeamMemberRepository::new(state.pool.clone());
    let member: TeamMember = repo
        .update(id, &request)
        .await?
        .ok_or_else(member_not_found)?
        .into();

    info!(member_id = %id, admin_id = %admin.user_id, "Team member updated");
    Ok(Json(member))
}

/// DELETE /api/v1/admin/team/:id
pub async fn delete_team_member(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = TeamMemberRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(member_not_found());
    }

    info!(member_id = %id, admin_id = %admin.user_id, "Team member deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Flip a member's public visibility.
///
/// PATCH /api/v1/admin/team/:id/visibility
pub async fn toggle_visibility(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<VisibilityResponse>, ApiError> {
    let repo = TeamMemberRepository::new(state.pool.clone());
    let is_visible = repo
        .toggle_visibility(id)
        .await?
        .ok_or_else(member_not_found)?;

    info!(member_id = %id, admin_id = %admin.user_id, is_visible, "Team member visibility changed");
    Ok(Json(VisibilityResponse { id, is_visible }))
}

/// Upload a portrait through the image store and attach it.
///
/// POST /api/v1/admin/team/:id/image
pub async fn upload_team_image(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<TeamMember>, ApiError> {
    let repo = TeamMemberRepository::new(state.pool.clone());
    if repo.find_by_id(id).await?.is_none() {
        return Err(member_not_found());
    }

    let mut image = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(IMAGE_FIELD) {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            image = Some((bytes, content_type));
            break;
        }
    }

    let (bytes, content_type) = image
        .ok_or_else(|| ApiError::Validation(format!("Missing '{}' field", IMAGE_FIELD)))?;

    let url = state.image_store.upload(&bytes, &content_type).await?;
    let member: TeamMember = repo
        .set_image_url(id, &url)
        .await?
        .ok_or_else(member_not_found)?
        .into();

    info!(member_id = %id, admin_id = %admin.user_id, "Team member image updated");
    Ok(Json(member))
}

/// Whole team as an `.xlsx` download.
///
/// GET /api/v1/admin/team/export
pub async fn export_team(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = TeamMemberRepository::new(state.pool.clone());
    let members: Vec<TeamMember> = repo.list_all().await?.into_iter().map(Into::into).collect();
    let bytes = spreadsheet::export_team(&members)?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"team.xlsx\"",
            ),
        ],
        bytes,
    ))
}
