//! Attendee, registration and QR check-in models.
//!
//! An attendee is unique by email and reused across events. Each event
//! participation is a registration that starts `pending` and is confirmed
//! once when the attendee's QR code is scanned at the door.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageParams;
use shared::validation::{is_valid_email, normalize_email, validate_phone};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Registration status. Only ever moves from `Pending` to `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RegistrationStatus::Pending),
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            _ => Err(format!("Invalid registration status: {}", s)),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A person who attends one or more events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// QR payload
// ============================================================================

/// Error parsing a scanned QR payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QrPayloadError {
    #[error("QR payload is not valid JSON: {0}")]
    Json(String),

    #[error("QR payload event id is not a UUID")]
    InvalidEventId,

    #[error("QR payload email is empty")]
    MissingEmail,
}

/// The content of an attendee QR code: `{"eventId":"...","email":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    pub event_id: Uuid,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQrPayload {
    event_id: String,
    email: String,
}

impl QrPayload {
    pub fn new(event_id: Uuid, email: &str) -> Self {
        Self {
            event_id,
            email: normalize_email(email),
        }
    }

    /// Parses a scanned payload. The email is normalized so that codes
    /// printed before a case change in the roster still match.
    pub fn parse(data: &str) -> Result<Self, QrPayloadError> {
        let raw: RawQrPayload =
            serde_json::from_str(data.trim()).map_err(|e| QrPayloadError::Json(e.to_string()))?;

        let event_id =
            Uuid::parse_str(raw.event_id.trim()).map_err(|_| QrPayloadError::InvalidEventId)?;

        if raw.email.trim().is_empty() {
            return Err(QrPayloadError::MissingEmail);
        }

        Ok(Self::new(event_id, &raw.email))
    }

    /// Encodes the payload as the JSON string stored in the QR code.
    pub fn encode(&self) -> String {
        format!(
            r#"{{"eventId":"{}","email":{}}}"#,
            self.event_id,
            serde_json::Value::String(self.email.clone())
        )
    }
}

// ============================================================================
// Roster spreadsheet rows
// ============================================================================

/// Error in an uploaded attendee roster. Any error rejects the whole batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Spreadsheet is missing the required '{0}' column")]
    MissingColumn(&'static str),

    #[error("Spreadsheet contains no attendee rows")]
    Empty,

    #[error("Row {row}: {field} is required")]
    BlankField { row: usize, field: &'static str },

    #[error("Row {row}: invalid email '{email}'")]
    InvalidEmail { row: usize, email: String },

    #[error("Row {row}: invalid phone number '{phone}'")]
    InvalidPhone { row: usize, phone: String },

    #[error("Row {row}: {field} must be at most {max} characters")]
    FieldTooLong {
        row: usize,
        field: &'static str,
        max: usize,
    },
}

// Column widths of the attendees table.
pub const MAX_FULL_NAME_LEN: usize = 200;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_PHONE_LEN: usize = 40;
pub const MAX_ORGANIZATION_LEN: usize = 200;

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterColumns {
    pub full_name: usize,
    pub email: usize,
    pub phone: Option<usize>,
    pub organization: Option<usize>,
}

fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl RosterColumns {
    /// Resolves columns from header cells. Matching ignores case, spaces,
    /// underscores and dashes.
    pub fn from_headers(headers: &[String]) -> Result<Self, RosterError> {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.contains(&normalize_header(h).as_str()))
        };

        Ok(Self {
            full_name: find(&["fullname", "name"]).ok_or(RosterError::MissingColumn("fullName"))?,
            email: find(&["email", "emailaddress"]).ok_or(RosterError::MissingColumn("email"))?,
            phone: find(&["phone", "phonenumber"]),
            organization: find(&["organization", "organisation", "company"]),
        })
    }
}

/// One validated attendee row from an uploaded roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRow {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn optional_cell(row: &[String], idx: Option<usize>) -> Option<String> {
    idx.map(|i| cell(row, i))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn check_length(
    row: usize,
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), RosterError> {
    if value.chars().count() > max {
        return Err(RosterError::FieldTooLong { row, field, max });
    }
    Ok(())
}

/// Validates a roster given as rows of cell text, header row first.
///
/// Fully empty rows are skipped. Later rows repeating an email already seen
/// are dropped so each attendee is processed once.
pub fn parse_roster(rows: &[Vec<String>]) -> Result<Vec<AttendeeRow>, RosterError> {
    let (headers, data) = rows.split_first().ok_or(RosterError::Empty)?;
    let columns = RosterColumns::from_headers(headers)?;

    let mut seen = HashSet::new();
    let mut parsed = Vec::new();

    for (idx, row) in data.iter().enumerate() {
        // Spreadsheet row number, header is row 1.
        let row_number = idx + 2;

        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let full_name = cell(row, columns.full_name);
        if full_name.is_empty() {
            return Err(RosterError::BlankField {
                row: row_number,
                field: "fullName",
            });
        }
        check_length(row_number, "fullName", full_name, MAX_FULL_NAME_LEN)?;

        let raw_email = cell(row, columns.email);
        if raw_email.is_empty() {
            return Err(RosterError::BlankField {
                row: row_number,
                field: "email",
            });
        }
        check_length(row_number, "email", raw_email, MAX_EMAIL_LEN)?;
        if !is_valid_email(raw_email) {
            return Err(RosterError::InvalidEmail {
                row: row_number,
                email: raw_email.to_string(),
            });
        }

        let phone = optional_cell(row, columns.phone);
        if let Some(phone) = &phone {
            check_length(row_number, "phone", phone, MAX_PHONE_LEN)?;
            if validate_phone(phone).is_err() {
                return Err(RosterError::InvalidPhone {
                    row: row_number,
                    phone: phone.clone(),
                });
            }
        }

        let organization = optional_cell(row, columns.organization);
        if let Some(organization) = &organization {
            check_length(row_number, "organization", organization, MAX_ORGANIZATION_LEN)?;
        }

        let email = normalize_email(raw_email);
        if !seen.insert(email.clone()) {
            continue;
        }

        parsed.push(AttendeeRow {
            full_name: full_name.to_string(),
            email,
            phone,
            organization,
        });
    }

    if parsed.is_empty() {
        return Err(RosterError::Empty);
    }

    Ok(parsed)
}

// ============================================================================
// Upload responses
// ============================================================================

/// One attendee issued a QR code by an upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedAttendee {
    pub attendee_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub status: RegistrationStatus,
    pub qr_code_data: String,
    pub qr_code_image: String,
}

/// Response for a roster upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAttendeesResponse {
    pub event_id: Uuid,
    pub processed: usize,
    pub created: usize,
    pub reused: usize,
    pub attendees: Vec<IssuedAttendee>,
}

/// An attendee as listed for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttendee {
    pub attendee_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub status: RegistrationStatus,
    pub validation_time: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

/// Query parameters for listing an event's attendees.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttendeesQuery {
    pub status: Option<RegistrationStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListAttendeesQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

// ============================================================================
// Check-in
// ============================================================================

/// Request payload for `POST /attendees/validate`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateQrRequest {
    #[validate(length(min = 1, max = 2048, message = "qrCodeData is required"))]
    pub qr_code_data: String,
}

/// Snapshot of a confirmed attendee returned by a successful scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckedInAttendee {
    pub full_name: String,
    pub email: String,
    pub status: RegistrationStatus,
    pub validation_time: DateTime<Utc>,
}

/// Result of scanning a QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    InvalidFormat,
    EventNotFound,
    AttendeeNotFound,
    AlreadyConfirmed,
    Confirmed(CheckedInAttendee),
}

impl CheckInOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, CheckInOutcome::Confirmed(_))
    }

    pub fn message(&self) -> &'static str {
        match self {
            CheckInOutcome::InvalidFormat => "Invalid QR code format",
            CheckInOutcome::EventNotFound => "Invalid QR code: event not found",
            CheckInOutcome::AttendeeNotFound => "Invalid QR code: attendee not found",
            CheckInOutcome::AlreadyConfirmed => "Attendee already registered or not registered",
            CheckInOutcome::Confirmed(_) => "Attendee validated successfully",
        }
    }

    /// Label used for the `checkins_total` metric.
    pub fn metric_label(&self) -> &'static str {
        match self {
            CheckInOutcome::InvalidFormat => "invalid_format",
            CheckInOutcome::EventNotFound => "event_not_found",
            CheckInOutcome::AttendeeNotFound => "attendee_not_found",
            CheckInOutcome::AlreadyConfirmed => "already_confirmed",
            CheckInOutcome::Confirmed(_) => "confirmed",
        }
    }
}

/// Response body for `POST /attendees/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateQrResponse {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendee: Option<CheckedInAttendee>,
}

impl From<CheckInOutcome> for ValidateQrResponse {
    fn from(outcome: CheckInOutcome) -> Self {
        let valid = outcome.is_valid();
        let message = outcome.message().to_string();
        let attendee = match outcome {
            CheckInOutcome::Confirmed(attendee) => Some(attendee),
            _ => None,
        };
        Self {
            valid,
            message,
            attendee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_registration_status_parse() {
        assert_eq!(
            "Confirmed".parse::<RegistrationStatus>().unwrap(),
            RegistrationStatus::Confirmed
        );
        assert!("checked".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn test_qr_payload_encode_format() {
        let event_id = Uuid::parse_str("7b1d3c1e-4c55-4d8f-9a3b-2f6f0c1d2e3f").unwrap();
        let payload = QrPayload::new(event_id, "A@X.com");
        assert_eq!(
            payload.encode(),
            r#"{"eventId":"7b1d3c1e-4c55-4d8f-9a3b-2f6f0c1d2e3f","email":"a@x.com"}"#
        );
    }

    #[test]
    fn test_qr_payload_parse_encoded() {
        let payload = QrPayload::new(Uuid::new_v4(), "a@x.com");
        assert_eq!(QrPayload::parse(&payload.encode()).unwrap(), payload);
    }

    #[test]
    fn test_qr_payload_survives_generated_emails() {
        use fake::faker::internet::en::SafeEmail;
        use fake::Fake;

        let event_id = Uuid::new_v4();
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            let payload = QrPayload::new(event_id, &email);
            assert_eq!(QrPayload::parse(&payload.encode()).unwrap(), payload);
        }
    }

    #[test]
    fn test_qr_payload_parse_normalizes_email() {
        let id = Uuid::new_v4();
        let data = format!(r#"{{"eventId":"{}","email":"  Speaker@TEDx.org "}}"#, id);
        let payload = QrPayload::parse(&data).unwrap();
        assert_eq!(payload.email, "speaker@tedx.org");
        assert_eq!(payload.event_id, id);
    }

    #[test]
    fn test_qr_payload_parse_rejects_malformed() {
        assert!(matches!(
            QrPayload::parse("not json"),
            Err(QrPayloadError::Json(_))
        ));
        assert!(matches!(
            QrPayload::parse(r#"{"email":"a@x.com"}"#),
            Err(QrPayloadError::Json(_))
        ));
        assert_eq!(
            QrPayload::parse(r#"{"eventId":"E1","email":"a@x.com"}"#),
            Err(QrPayloadError::InvalidEventId)
        );
        let data = format!(r#"{{"eventId":"{}","email":" "}}"#, Uuid::new_v4());
        assert_eq!(QrPayload::parse(&data), Err(QrPayloadError::MissingEmail));
    }

    #[test]
    fn test_roster_columns_aliases() {
        let headers: Vec<String> = ["Company", "E-mail", "Full Name", "Phone Number"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let columns = RosterColumns::from_headers(&headers).unwrap();
        assert_eq!(columns.full_name, 2);
        assert_eq!(columns.email, 1);
        assert_eq!(columns.phone, Some(3));
        assert_eq!(columns.organization, Some(0));
    }

    #[test]
    fn test_roster_columns_missing_email() {
        let headers = vec!["fullName".to_string(), "phone".to_string()];
        assert_eq!(
            RosterColumns::from_headers(&headers),
            Err(RosterError::MissingColumn("email"))
        );
    }

    #[test]
    fn test_parse_roster_valid() {
        let roster = rows(&[
            &["fullName", "email", "phone"],
            &["A. Ben", "A@X.com", ""],
            &["Sami K", "sami@x.com", "+216 22 333 444"],
        ]);
        let parsed = parse_roster(&roster).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].email, "a@x.com");
        assert_eq!(parsed[0].phone, None);
        assert_eq!(parsed[1].phone.as_deref(), Some("+216 22 333 444"));
        assert_eq!(parsed[1].organization, None);
    }

    #[test]
    fn test_parse_roster_blank_name_rejects_batch() {
        let roster = rows(&[
            &["fullName", "email"],
            &["A. Ben", "a@x.com"],
            &["", "b@x.com"],
        ]);
        assert_eq!(
            parse_roster(&roster),
            Err(RosterError::BlankField {
                row: 3,
                field: "fullName"
            })
        );
    }

    #[test]
    fn test_parse_roster_blank_email_rejects_batch() {
        let roster = rows(&[&["name", "email"], &["A. Ben", "  "]]);
        assert_eq!(
            parse_roster(&roster),
            Err(RosterError::BlankField {
                row: 2,
                field: "email"
            })
        );
    }

    #[test]
    fn test_parse_roster_invalid_email() {
        let roster = rows(&[&["name", "email"], &["A. Ben", "not-an-email"]]);
        assert!(matches!(
            parse_roster(&roster),
            Err(RosterError::InvalidEmail { row: 2, .. })
        ));
    }

    #[test]
    fn test_parse_roster_rejects_overlong_name() {
        let name = "N".repeat(250);
        let roster = rows(&[&["name", "email"], &[name.as_str(), "long@x.com"]]);
        assert_eq!(
            parse_roster(&roster),
            Err(RosterError::FieldTooLong {
                row: 2,
                field: "fullName",
                max: MAX_FULL_NAME_LEN
            })
        );

        let exact = "N".repeat(MAX_FULL_NAME_LEN);
        let roster = rows(&[&["name", "email"], &[exact.as_str(), "long@x.com"]]);
        assert_eq!(parse_roster(&roster).unwrap()[0].full_name, exact);
    }

    #[test]
    fn test_parse_roster_rejects_overlong_organization() {
        let organization = "Org ".repeat(60);
        let roster = rows(&[
            &["fullName", "email", "company"],
            &["A. Ben", "a@x.com", "Olive Bank"],
            &["Sami K", "sami@x.com", organization.as_str()],
        ]);
        let err = parse_roster(&roster).unwrap_err();
        assert_eq!(
            err,
            RosterError::FieldTooLong {
                row: 3,
                field: "organization",
                max: MAX_ORGANIZATION_LEN
            }
        );
        assert_eq!(
            err.to_string(),
            "Row 3: organization must be at most 200 characters"
        );
    }

    #[test]
    fn test_parse_roster_rejects_invalid_phone() {
        let roster = rows(&[
            &["fullName", "email", "phone"],
            &["A. Ben", "a@x.com", "+216 22 333 444 / +216 55 666 777 / +216 99"],
        ]);
        assert_eq!(
            parse_roster(&roster),
            Err(RosterError::FieldTooLong {
                row: 2,
                field: "phone",
                max: MAX_PHONE_LEN
            })
        );

        let roster = rows(&[
            &["fullName", "email", "phone"],
            &["A. Ben", "a@x.com", "+216 22 / 55"],
        ]);
        assert!(matches!(
            parse_roster(&roster),
            Err(RosterError::InvalidPhone { row: 2, .. })
        ));
    }

    #[test]
    fn test_parse_roster_skips_empty_rows_and_duplicates() {
        let roster = rows(&[
            &["fullName", "email"],
            &["", ""],
            &["A. Ben", "a@x.com"],
            &["A. Ben again", "A@x.com"],
        ]);
        let parsed = parse_roster(&roster).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].full_name, "A. Ben");
    }

    #[test]
    fn test_parse_roster_empty() {
        assert_eq!(parse_roster(&[]), Err(RosterError::Empty));
        let header_only = rows(&[&["fullName", "email"]]);
        assert_eq!(parse_roster(&header_only), Err(RosterError::Empty));
    }

    #[test]
    fn test_short_rows_read_as_blank() {
        let roster = rows(&[&["fullName", "email"], &["A. Ben"]]);
        assert_eq!(
            parse_roster(&roster),
            Err(RosterError::BlankField {
                row: 2,
                field: "email"
            })
        );
    }

    #[test]
    fn test_check_in_outcome_messages() {
        assert_eq!(
            CheckInOutcome::AlreadyConfirmed.message(),
            "Attendee already registered or not registered"
        );
        assert!(!CheckInOutcome::EventNotFound.is_valid());
    }

    #[test]
    fn test_validate_response_from_outcome() {
        let invalid: ValidateQrResponse = CheckInOutcome::InvalidFormat.into();
        assert!(!invalid.valid);
        let json = serde_json::to_value(&invalid).unwrap();
        assert!(json.get("attendee").is_none());

        let confirmed: ValidateQrResponse = CheckInOutcome::Confirmed(CheckedInAttendee {
            full_name: "A. Ben".to_string(),
            email: "a@x.com".to_string(),
            status: RegistrationStatus::Confirmed,
            validation_time: Utc::now(),
        })
        .into();
        let json = serde_json::to_value(&confirmed).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["message"], "Attendee validated successfully");
        assert_eq!(json["attendee"]["status"], "confirmed");
        assert!(json["attendee"].get("validationTime").is_some());
    }
}
