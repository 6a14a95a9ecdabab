//! Application entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{ApplicationKind, ApplicationStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for application_kind that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "application_kind", rename_all = "lowercase")]
pub enum ApplicationKindDb {
    Volunteer,
    Press,
    Performer,
}

impl From<ApplicationKindDb> for ApplicationKind {
    fn from(db_kind: ApplicationKindDb) -> Self {
        match db_kind {
            ApplicationKindDb::Volunteer => ApplicationKind::Volunteer,
            ApplicationKindDb::Press => ApplicationKind::Press,
            ApplicationKindDb::Performer => ApplicationKind::Performer,
        }
    }
}

impl From<ApplicationKind> for ApplicationKindDb {
    fn from(kind: ApplicationKind) -> Self {
        match kind {
            ApplicationKind::Volunteer => ApplicationKindDb::Volunteer,
            ApplicationKind::Press => ApplicationKindDb::Press,
            ApplicationKind::Performer => ApplicationKindDb::Performer,
        }
    }
}

/// Database enum for application_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatusDb {
    Received,
    Reviewed,
    Accepted,
    Rejected,
}

impl From<ApplicationStatusDb> for ApplicationStatus {
    fn from(db_status: ApplicationStatusDb) -> Self {
        match db_status {
            ApplicationStatusDb::Received => ApplicationStatus::Received,
            ApplicationStatusDb::Reviewed => ApplicationStatus::Reviewed,
            ApplicationStatusDb::Accepted => ApplicationStatus::Accepted,
            ApplicationStatusDb::Rejected => ApplicationStatus::Rejected,
        }
    }
}

impl From<ApplicationStatus> for ApplicationStatusDb {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Received => ApplicationStatusDb::Received,
            ApplicationStatus::Reviewed => ApplicationStatusDb::Reviewed,
            ApplicationStatus::Accepted => ApplicationStatusDb::Accepted,
            ApplicationStatus::Rejected => ApplicationStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the applications table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationEntity {
    pub id: Uuid,
    pub kind: ApplicationKindDb,
    pub full_name: String,
    pub email: String,
    pub answers: serde_json::Value,
    pub status: ApplicationStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationEntity> for domain::models::Application {
    fn from(entity: ApplicationEntity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind.into(),
            full_name: entity.full_name,
            email: entity.email,
            answers: entity.answers,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_conversion_covers_all() {
        for kind in ApplicationKind::ALL {
            let db: ApplicationKindDb = kind.into();
            assert_eq!(ApplicationKind::from(db), kind);
        }
    }
}
