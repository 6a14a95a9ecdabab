//! Application form handlers.
//!
//! Form schemas live in the domain crate; these handlers serve them and run
//! submissions through the one schema validator.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::application::{
    ListApplicationsQuery, SubmitApplicationResponse, UpdateApplicationStatusRequest,
};
use domain::models::{schema_for, Application, ApplicationKind, FormSchema};
use persistence::repositories::ApplicationRepository;
use serde_json::Value;
use shared::pagination::Paginated;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;

fn parse_kind(kind: &str) -> Result<ApplicationKind, ApiError> {
    kind.parse().map_err(ApiError::NotFound)
}

/// GET /api/v1/forms/:kind
pub async fn get_form_schema(
    Path(kind): Path<String>,
) -> Result<Json<&'static FormSchema>, ApiError> {
    Ok(Json(schema_for(parse_kind(&kind)?)))
}

/// Validate and store a form submission.
///
/// POST /api/v1/forms/:kind
pub async fn submit_application(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<SubmitApplicationResponse>), ApiError> {
    let kind = parse_kind(&kind)?;
    let submission = body
        .as_object()
        .ok_or_else(|| ApiError::Validation("Submission must be a JSON object".to_string()))?;

    let validated = schema_for(kind)
        .validate_submission(submission)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let repo = ApplicationRepository::new(state.pool.clone());
    let application: Application = repo
        .create(
            kind.into(),
            &validated.full_name,
            &validated.email,
            &Value::Object(validated.answers),
        )
        .await?
        .into();

    info!(application_id = %application.id, kind = %kind, "Application submitted");
    Ok((
        StatusCode::CREATED,
        Json(SubmitApplicationResponse {
            id: application.id,
            kind: application.kind,
            status: application.status,
            message: "Application received".to_string(),
        }),
    ))
}

/// GET /api/v1/admin/applications
pub async fn list_applications(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<Paginated<Application>>, ApiError> {
    let params = query.page_params();
    let kind = query.kind.map(Into::into);
    let status = query.status.map(Into::into);

    let repo = ApplicationRepository::new(state.pool.clone());
    let entities = repo
        .list(kind, status, params.limit(), params.offset())
        .await?;
    let total = repo.count(kind, status).await?;

    let data = entities.into_iter().map(Into::into).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// PATCH /api/v1/admin/applications/:id/status
pub async fn update_application_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateApplicationStatusRequest>,
) -> Result<Json<Application>, ApiError> {
    let repo = ApplicationRepository::new(state.pool.clone());
    let application: Application = repo
        .update_status(id, request.status.into())
        .await?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?
        .into();

    info!(
        application_id = %id,
        admin_id = %admin.user_id,
        status = %application.status,
        "Application status changed"
    );
    Ok(Json(application))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("volunteer").unwrap(), ApplicationKind::Volunteer);
        assert!(matches!(parse_kind("sponsor"), Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_form_schema() {
        let Json(schema) = get_form_schema(Path("press".to_string())).await.unwrap();
        assert_eq!(schema.kind, ApplicationKind::Press);
        assert!(!schema.fields.is_empty());
    }
}
