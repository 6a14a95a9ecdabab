//! Partner endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::partner::{CreatePartnerRequest, UpdatePartnerRequest};
use domain::models::Partner;
use persistence::repositories::PartnerRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;

fn partner_not_found() -> ApiError {
    ApiError::NotFound("Partner not found".to_string())
}

/// Partners grouped by tier, then display order.
///
/// GET /api/v1/partners
pub async fn list_partners(State(state): State<AppState>) -> Result<Json<Vec<Partner>>, ApiError> {
    let repo = PartnerRepository::new(state.pool.clone());
    let partners = repo.list().await?;
    Ok(Json(partners.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/admin/partners
pub async fn create_partner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<CreatePartnerRequest>,
) -> Result<(StatusCode, Json<Partner>), ApiError> {
    request.validate()?;

    let repo = PartnerRepository::new(state.pool.clone());
    let partner: Partner = repo.create(&request).await?.into();

    info!(
        partner_id = %partner.id,
        admin_id = %admin.user_id,
        tier = %partner.tier,
        "Partner created"
    );
    Ok((StatusCode::CREATED, Json(partner)))
}

/// PUT /api/v1/admin/partners/:id
pub async fn update_partner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePartnerRequest>,
) -> Result<Json<Partner>, ApiError> {
    request.validate()?;

    let repo = PartnerRepository::new(state.pool.clone());
    let partner: Partner = repo
        .update(id, &request)
        .await?
        .ok_or_else(partner_not_found)?
        .into();

    info!(partner_id = %id, admin_id = %admin.user_id, "Partner updated");
    Ok(Json(partner))
}

/// DELETE /api/v1/admin/partners/:id
pub async fn delete_partner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = PartnerRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(partner_not_found());
    }

    info!(partner_id = %id, admin_id = %admin.user_id, "Partner deleted");
    Ok(StatusCode::NO_CONTENT)
}
