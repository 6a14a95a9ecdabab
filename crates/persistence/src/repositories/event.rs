//! Event repository for database operations.

use domain::models::event::{CreateEventRequest, UpdateEventRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

const EVENT_COLUMNS: &str = "id, title, description, event_date, location, banner_url, is_published, created_at, updated_at";

/// Repository for event operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List events, optionally only published ones, ordered by date.
    pub async fn list(&self, published_only: bool) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let sql = format!(
            "SELECT {} FROM events WHERE ($1 = false OR is_published = true) ORDER BY event_date ASC, title ASC",
            EVENT_COLUMNS
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(published_only)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find an event by ID regardless of publication state.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let sql = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Returns true if an event with this ID exists.
    pub async fn exists(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("event_exists");
        let result =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }

    pub async fn create(&self, req: &CreateEventRequest) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let sql = format!(
            r#"
            INSERT INTO events (title, description, event_date, location, banner_url, is_published)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(req.title.trim())
            .bind(&req.description)
            .bind(req.event_date)
            .bind(&req.location)
            .bind(&req.banner_url)
            .bind(req.is_published)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Update an event. Absent fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateEventRequest,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let sql = format!(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_date = COALESCE($4, event_date),
                location = COALESCE($5, location),
                banner_url = COALESCE($6, banner_url),
                is_published = COALESCE($7, is_published),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        );
        let result = sqlx::query_as::<_, EventEntity>(&sql)
            .bind(id)
            .bind(req.title.as_deref().map(str::trim))
            .bind(&req.description)
            .bind(req.event_date)
            .bind(&req.location)
            .bind(&req.banner_url)
            .bind(req.is_published)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Delete an event. Its registrations are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
