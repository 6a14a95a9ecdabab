//! Attendee and registration entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::attendee::{CheckedInAttendee, EventAttendee};
use domain::models::RegistrationStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for registration_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
pub enum RegistrationStatusDb {
    Pending,
    Confirmed,
}

impl From<RegistrationStatusDb> for RegistrationStatus {
    fn from(db_status: RegistrationStatusDb) -> Self {
        match db_status {
            RegistrationStatusDb::Pending => RegistrationStatus::Pending,
            RegistrationStatusDb::Confirmed => RegistrationStatus::Confirmed,
        }
    }
}

impl From<RegistrationStatus> for RegistrationStatusDb {
    fn from(status: RegistrationStatus) -> Self {
        match status {
            RegistrationStatus::Pending => RegistrationStatusDb::Pending,
            RegistrationStatus::Confirmed => RegistrationStatusDb::Confirmed,
        }
    }
}

/// Database row mapping for the attendees table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendeeEntity {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AttendeeEntity> for domain::models::Attendee {
    fn from(entity: AttendeeEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            phone: entity.phone,
            organization: entity.organization,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Attendee upserted by a roster upload.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedAttendeeEntity {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// True when the row was inserted rather than updated.
    pub inserted: bool,
}

/// Attendee joined with its registration for one event.
#[derive(Debug, Clone, FromRow)]
pub struct EventAttendeeEntity {
    pub attendee_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub status: RegistrationStatusDb,
    pub validation_time: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

impl From<EventAttendeeEntity> for EventAttendee {
    fn from(entity: EventAttendeeEntity) -> Self {
        Self {
            attendee_id: entity.attendee_id,
            full_name: entity.full_name,
            email: entity.email,
            phone: entity.phone,
            organization: entity.organization,
            status: entity.status.into(),
            validation_time: entity.validation_time,
            registered_at: entity.registered_at,
        }
    }
}

/// Row returned by the conditional check-in update.
#[derive(Debug, Clone, FromRow)]
pub struct CheckInEntity {
    pub full_name: String,
    pub email: String,
    pub status: RegistrationStatusDb,
    pub validation_time: DateTime<Utc>,
}

impl From<CheckInEntity> for CheckedInAttendee {
    fn from(entity: CheckInEntity) -> Self {
        Self {
            full_name: entity.full_name,
            email: entity.email,
            status: entity.status.into(),
            validation_time: entity.validation_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion() {
        assert_eq!(
            RegistrationStatus::from(RegistrationStatusDb::Confirmed),
            RegistrationStatus::Confirmed
        );
        assert_eq!(
            RegistrationStatusDb::from(RegistrationStatus::Pending),
            RegistrationStatusDb::Pending
        );
    }

    #[test]
    fn test_check_in_entity_to_domain() {
        let now = Utc::now();
        let checked: CheckedInAttendee = CheckInEntity {
            full_name: "A. Ben".to_string(),
            email: "a@x.com".to_string(),
            status: RegistrationStatusDb::Confirmed,
            validation_time: now,
        }
        .into();
        assert_eq!(checked.status, RegistrationStatus::Confirmed);
        assert_eq!(checked.validation_time, now);
    }
}
