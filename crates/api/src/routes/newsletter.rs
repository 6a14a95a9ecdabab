//! Newsletter endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use domain::models::newsletter::{
    ListSubscriptionsQuery, SubscribeRequest, UpdateSubscriptionStatusRequest,
};
use domain::models::NewsletterSubscription;
use persistence::repositories::NewsletterRepository;
use shared::pagination::Paginated;
use shared::validation::normalize_email;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::middleware::metrics::record_newsletter_subscription;
use crate::services::spreadsheet::{self, XLSX_CONTENT_TYPE};

fn subscription_not_found() -> ApiError {
    ApiError::NotFound("Subscription not found".to_string())
}

/// Subscribe an address. Known addresses, unsubscribed or not, are a
/// conflict.
///
/// POST /api/v1/newsletter/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<NewsletterSubscription>), ApiError> {
    request.validate()?;
    let email = normalize_email(&request.email);

    let repo = NewsletterRepository::new(state.pool.clone());
    let subscription: NewsletterSubscription = repo
        .subscribe(&email)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict("Email is already subscribed".to_string()),
            other => other,
        })?
        .into();

    record_newsletter_subscription();
    info!(subscription_id = %subscription.id, "Newsletter subscription created");
    Ok((StatusCode::CREATED, Json(subscription)))
}

/// GET /api/v1/admin/newsletter
pub async fn list_subscriptions(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListSubscriptionsQuery>,
) -> Result<Json<Paginated<NewsletterSubscription>>, ApiError> {
    let params = query.page_params();
    let status = query.status.map(Into::into);

    let repo = NewsletterRepository::new(state.pool.clone());
    let entities = repo.list(status, params.limit(), params.offset()).await?;
    let total = repo.count(status).await?;

    let data = entities.into_iter().map(Into::into).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// PATCH /api/v1/admin/newsletter/:id/status
pub async fn update_subscription_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSubscriptionStatusRequest>,
) -> Result<Json<NewsletterSubscription>, ApiError> {
    let repo = NewsletterRepository::new(state.pool.clone());
    let subscription: NewsletterSubscription = repo
        .update_status(id, request.status.into())
        .await?
        .ok_or_else(subscription_not_found)?
        .into();

    info!(
        subscription_id = %id,
        admin_id = %admin.user_id,
        status = %subscription.status,
        "Newsletter subscription status changed"
    );
    Ok(Json(subscription))
}

/// DELETE /api/v1/admin/newsletter/:id
pub async fn delete_subscription(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = NewsletterRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(subscription_not_found());
    }

    info!(subscription_id = %id, admin_id = %admin.user_id, "Newsletter subscription deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/newsletter/export
pub async fn export_subscriptions(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = NewsletterRepository::new(state.pool.clone());
    let subscriptions: Vec<NewsletterSubscription> =
        repo.list_all().await?.into_iter().map(Into::into).collect();
    let bytes = spreadsheet::export_newsletter(&subscriptions)?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"newsletter.xlsx\"",
            ),
        ],
        bytes,
    ))
}
