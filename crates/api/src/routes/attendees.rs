//! Attendee upload, QR issuance and check-in handlers.

use axum::{
    extract::{rejection::JsonRejection, multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::attendee::{
    CheckedInAttendee, EventAttendee, IssuedAttendee, ListAttendeesQuery, UploadAttendeesResponse,
    ValidateQrRequest, ValidateQrResponse,
};
use domain::models::{CheckInOutcome, QrPayload, RegistrationStatus};
use persistence::repositories::{AttendeeRepository, EventRepository};
use shared::pagination::Paginated;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::middleware::metrics::{record_attendees_uploaded, record_checkin};
use crate::services::{qr, spreadsheet};

/// Multipart field carrying the roster workbook.
const ROSTER_FIELD: &str = "file";

pub(crate) fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Uploaded file is too large".to_string())
    } else {
        ApiError::Validation(format!("Invalid multipart body: {}", err.body_text()))
    }
}

async fn ensure_event(state: &AppState, event_id: Uuid) -> Result<(), ApiError> {
    let exists = EventRepository::new(state.pool.clone())
        .exists(event_id)
        .await?;
    if exists {
        Ok(())
    } else {
        Err(ApiError::NotFound("Event not found".to_string()))
    }
}

fn issue(
    event_id: Uuid,
    attendee_id: Uuid,
    full_name: String,
    email: String,
    status: RegistrationStatus,
) -> Result<IssuedAttendee, ApiError> {
    let qr_code_data = QrPayload::new(event_id, &email).encode();
    let qr_code_image = qr::render_data_url(&qr_code_data)?;
    Ok(IssuedAttendee {
        attendee_id,
        full_name,
        email,
        status,
        qr_code_data,
        qr_code_image,
    })
}

/// Upload an `.xlsx` roster and issue QR codes.
///
/// POST /api/v1/events/:id/attendees/upload
pub async fn upload_attendees(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(event_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadAttendeesResponse>, ApiError> {
    ensure_event(&state, event_id).await?;

    let max_bytes = state.config.limits.max_upload_bytes;
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(ROSTER_FIELD) {
            file = Some(field.bytes().await.map_err(multipart_error)?);
            break;
        }
    }

    let bytes = file.ok_or_else(|| {
        ApiError::Validation(format!("Missing '{}' field with the .xlsx roster", ROSTER_FIELD))
    })?;
    if bytes.len() > max_bytes {
        return Err(ApiError::PayloadTooLarge(format!(
            "Spreadsheet exceeds the {} byte limit",
            max_bytes
        )));
    }

    let rows = spreadsheet::parse_attendee_workbook(&bytes, state.config.limits.max_roster_rows)?;

    let repo = AttendeeRepository::new(state.pool.clone());
    let registered = repo.register_roster(event_id, &rows).await?;

    let created = registered.iter().filter(|r| r.attendee.inserted).count();
    let attendees = registered
        .into_iter()
        .map(|r| {
            issue(
                event_id,
                r.attendee.id,
                r.attendee.full_name,
                r.attendee.email,
                r.status.into(),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let processed = attendees.len();
    record_attendees_uploaded(processed);
    info!(
        event_id = %event_id,
        admin_id = %admin.user_id,
        processed,
        created,
        "Attendee roster uploaded"
    );

    Ok(Json(UploadAttendeesResponse {
        event_id,
        processed,
        created,
        reused: processed - created,
        attendees,
    }))
}

/// Attendees registered for an event.
///
/// GET /api/v1/events/:id/attendees
pub async fn list_attendees(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(event_id): Path<Uuid>,
    Query(query): Query<ListAttendeesQuery>,
) -> Result<Json<Paginated<EventAttendee>>, ApiError> {
    ensure_event(&state, event_id).await?;

    let params = query.page_params();
    let status = query.status.map(Into::into);
    let repo = AttendeeRepository::new(state.pool.clone());

    let entities = repo
        .list_for_event(event_id, status, params.limit(), params.offset())
        .await?;
    let total = repo.count_for_event(event_id, status).await?;

    let data = entities.into_iter().map(Into::into).collect();
    Ok(Json(Paginated::new(data, &params, total)))
}

/// Regenerate the QR code of an existing registration.
///
/// GET /api/v1/events/:id/attendees/:attendee_id/qr
pub async fn get_attendee_qr(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((event_id, attendee_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<IssuedAttendee>, ApiError> {
    let repo = AttendeeRepository::new(state.pool.clone());
    let registration = repo
        .find_registration(event_id, attendee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Registration not found".to_string()))?;

    let issued = issue(
        event_id,
        registration.attendee_id,
        registration.full_name,
        registration.email,
        registration.status.into(),
    )?;
    Ok(Json(issued))
}

fn outcome_status(outcome: &CheckInOutcome) -> StatusCode {
    match outcome {
        CheckInOutcome::Confirmed(_) => StatusCode::OK,
        CheckInOutcome::InvalidFormat | CheckInOutcome::AlreadyConfirmed => StatusCode::BAD_REQUEST,
        CheckInOutcome::EventNotFound | CheckInOutcome::AttendeeNotFound => StatusCode::NOT_FOUND,
    }
}

async fn check_in(state: &AppState, qr_code_data: &str) -> Result<CheckInOutcome, ApiError> {
    let payload = match QrPayload::parse(qr_code_data) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Rejected QR payload");
            return Ok(CheckInOutcome::InvalidFormat);
        }
    };

    if !EventRepository::new(state.pool.clone())
        .exists(payload.event_id)
        .await?
    {
        return Ok(CheckInOutcome::EventNotFound);
    }

    let repo = AttendeeRepository::new(state.pool.clone());
    let registration = match repo
        .find_registration_by_email(payload.event_id, &payload.email)
        .await?
    {
        Some(registration) => registration,
        None => return Ok(CheckInOutcome::AttendeeNotFound),
    };

    // Conditional update; a concurrent scan that got there first yields None.
    let outcome = match repo
        .confirm_pending(payload.event_id, registration.attendee_id)
        .await?
    {
        Some(confirmed) => CheckInOutcome::Confirmed(CheckedInAttendee::from(confirmed)),
        None => CheckInOutcome::AlreadyConfirmed,
    };

    info!(
        event_id = %payload.event_id,
        attendee_id = %registration.attendee_id,
        result = outcome.metric_label(),
        "QR code scanned"
    );
    Ok(outcome)
}

/// Check an attendee in by QR payload.
///
/// POST /api/v1/attendees/validate
pub async fn validate_qr(
    State(state): State<AppState>,
    _admin: AdminUser,
    body: Result<Json<ValidateQrRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ValidateQrResponse>), ApiError> {
    let outcome = match body {
        Ok(Json(request)) if request.validate().is_ok() => {
            check_in(&state, &request.qr_code_data).await?
        }
        _ => CheckInOutcome::InvalidFormat,
    };

    record_checkin(outcome.metric_label());
    Ok((outcome_status(&outcome), Json(outcome.into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_outcome_status_codes() {
        assert_eq!(
            outcome_status(&CheckInOutcome::InvalidFormat),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            outcome_status(&CheckInOutcome::EventNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            outcome_status(&CheckInOutcome::AttendeeNotFound),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            outcome_status(&CheckInOutcome::AlreadyConfirmed),
            StatusCode::BAD_REQUEST
        );
        let confirmed = CheckInOutcome::Confirmed(CheckedInAttendee {
            full_name: "Lina".to_string(),
            email: "lina@example.com".to_string(),
            status: RegistrationStatus::Confirmed,
            validation_time: Utc::now(),
        });
        assert_eq!(outcome_status(&confirmed), StatusCode::OK);
    }

    #[test]
    fn test_issue_builds_scannable_payload() {
        let event_id = Uuid::new_v4();
        let issued = issue(
            event_id,
            Uuid::new_v4(),
            "Lina".to_string(),
            "lina@example.com".to_string(),
            RegistrationStatus::Pending,
        )
        .unwrap();

        let parsed = QrPayload::parse(&issued.qr_code_data).unwrap();
        assert_eq!(parsed.event_id, event_id);
        assert_eq!(parsed.email, "lina@example.com");
        assert!(issued.qr_code_image.starts_with("data:image/svg+xml;base64,"));
    }
}
