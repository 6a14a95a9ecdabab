//! Attendee and registration repository.
//!
//! Roster uploads run in a single transaction so a failing row leaves no
//! partial batch behind. Check-in is one conditional update, which makes a
//! registration confirm at most once even under concurrent scans.

use domain::models::attendee::AttendeeRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    CheckInEntity, EventAttendeeEntity, RegistrationStatusDb, UpsertedAttendeeEntity,
};
use crate::metrics::QueryTimer;

/// An attendee registered for an event by a roster upload.
#[derive(Debug, Clone)]
pub struct RegisteredAttendee {
    pub attendee: UpsertedAttendeeEntity,
    /// Status of the registration after the upload. Existing registrations
    /// keep their status.
    pub status: RegistrationStatusDb,
}

/// Repository for attendees and their event registrations.
#[derive(Clone)]
pub struct AttendeeRepository {
    pool: PgPool,
}

impl AttendeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Registers a validated roster for an event.
    ///
    /// Attendees are upserted by email: an existing row keeps its id and gets
    /// the sheet's name, phone and organization. A registration is inserted
    /// when missing and left untouched otherwise, so uploading the same sheet
    /// twice is a no-op for registrations.
    pub async fn register_roster(
        &self,
        event_id: Uuid,
        rows: &[AttendeeRow],
    ) -> Result<Vec<RegisteredAttendee>, sqlx::Error> {
        let timer = QueryTimer::new("register_attendee_roster");

        let mut tx = self.pool.begin().await?;
        let mut registered = Vec::with_capacity(rows.len());

        for row in rows {
            let attendee = sqlx::query_as::<_, UpsertedAttendeeEntity>(
                r#"
                INSERT INTO attendees (full_name, email, phone, organization)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (email) DO UPDATE
                SET full_name = EXCLUDED.full_name,
                    phone = COALESCE(EXCLUDED.phone, attendees.phone),
                    organization = COALESCE(EXCLUDED.organization, attendees.organization),
                    updated_at = NOW()
                RETURNING id, full_name, email, (xmax = 0) AS inserted
                "#,
            )
            .bind(&row.full_name)
            .bind(&row.email)
            .bind(&row.phone)
            .bind(&row.organization)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO registrations (attendee_id, event_id, status)
                VALUES ($1, $2, 'pending')
                ON CONFLICT (attendee_id, event_id) DO NOTHING
                "#,
            )
            .bind(attendee.id)
            .bind(event_id)
            .execute(&mut *tx)
            .await?;

            let status = sqlx::query_scalar::<_, RegistrationStatusDb>(
                r#"
                SELECT status FROM registrations
                WHERE attendee_id = $1 AND event_id = $2
                "#,
            )
            .bind(attendee.id)
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;

            registered.push(RegisteredAttendee { attendee, status });
        }

        tx.commit().await?;
        timer.record();
        Ok(registered)
    }

    /// List attendees registered for an event, newest registrations last.
    pub async fn list_for_event(
        &self,
        event_id: Uuid,
        status: Option<RegistrationStatusDb>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EventAttendeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_event_attendees");
        let result = sqlx::query_as::<_, EventAttendeeEntity>(
            r#"
            SELECT a.id AS attendee_id, a.full_name, a.email, a.phone, a.organization,
                   r.status, r.validation_time, r.created_at AS registered_at
            FROM registrations r
            JOIN attendees a ON a.id = r.attendee_id
            WHERE r.event_id = $1
              AND ($2::registration_status IS NULL OR r.status = $2)
            ORDER BY r.created_at ASC, a.full_name ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(event_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count attendees registered for an event.
    pub async fn count_for_event(
        &self,
        event_id: Uuid,
        status: Option<RegistrationStatusDb>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_event_attendees");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM registrations r
            WHERE r.event_id = $1
              AND ($2::registration_status IS NULL OR r.status = $2)
            "#,
        )
        .bind(event_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find one attendee's registration for an event by attendee ID.
    pub async fn find_registration(
        &self,
        event_id: Uuid,
        attendee_id: Uuid,
    ) -> Result<Option<EventAttendeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration");
        let result = sqlx::query_as::<_, EventAttendeeEntity>(
            r#"
            SELECT a.id AS attendee_id, a.full_name, a.email, a.phone, a.organization,
                   r.status, r.validation_time, r.created_at AS registered_at
            FROM registrations r
            JOIN attendees a ON a.id = r.attendee_id
            WHERE r.event_id = $1 AND a.id = $2
            "#,
        )
        .bind(event_id)
        .bind(attendee_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find one attendee's registration for an event by email.
    pub async fn find_registration_by_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> Result<Option<EventAttendeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_email");
        let result = sqlx::query_as::<_, EventAttendeeEntity>(
            r#"
            SELECT a.id AS attendee_id, a.full_name, a.email, a.phone, a.organization,
                   r.status, r.validation_time, r.created_at AS registered_at
            FROM registrations r
            JOIN attendees a ON a.id = r.attendee_id
            WHERE r.event_id = $1 AND a.email = $2
            "#,
        )
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Confirm a pending registration and stamp the validation time.
    ///
    /// Returns `None` when the registration is not pending, including when a
    /// concurrent scan confirmed it first.
    pub async fn confirm_pending(
        &self,
        event_id: Uuid,
        attendee_id: Uuid,
    ) -> Result<Option<CheckInEntity>, sqlx::Error> {
        let timer = QueryTimer::new("confirm_pending_registration");
        let result = sqlx::query_as::<_, CheckInEntity>(
            r#"
            UPDATE registrations r
            SET status = 'confirmed', validation_time = NOW(), updated_at = NOW()
            FROM attendees a
            WHERE a.id = r.attendee_id
              AND r.event_id = $1
              AND r.attendee_id = $2
              AND r.status = 'pending'
            RETURNING a.full_name, a.email, r.status, r.validation_time
            "#,
        )
        .bind(event_id)
        .bind(attendee_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
