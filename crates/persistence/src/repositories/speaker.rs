//! Speaker repository for database operations.

use domain::models::speaker::{CreateSpeakerRequest, UpdateSpeakerRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SpeakerEntity;
use crate::metrics::QueryTimer;

const SPEAKER_COLUMNS: &str =
    "id, event_id, full_name, title, talk_title, bio, image_url, created_at, updated_at";

#[derive(Clone)]
pub struct SpeakerRepository {
    pool: PgPool,
}

impl SpeakerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List speakers, optionally only those of one event.
    pub async fn list(&self, event_id: Option<Uuid>) -> Result<Vec<SpeakerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_speakers");
        let sql = format!(
            "SELECT {} FROM speakers WHERE ($1::UUID IS NULL OR event_id = $1) ORDER BY full_name ASC",
            SPEAKER_COLUMNS
        );
        let result = sqlx::query_as::<_, SpeakerEntity>(&sql)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SpeakerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_speaker_by_id");
        let sql = format!("SELECT {} FROM speakers WHERE id = $1", SPEAKER_COLUMNS);
        let result = sqlx::query_as::<_, SpeakerEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Create a speaker. An unknown event id is a foreign key violation.
    pub async fn create(&self, req: &CreateSpeakerRequest) -> Result<SpeakerEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_speaker");
        let sql = format!(
            r#"
            INSERT INTO speakers (event_id, full_name, title, talk_title, bio, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SPEAKER_COLUMNS
        );
        let result = sqlx::query_as::<_, SpeakerEntity>(&sql)
            .bind(req.event_id)
            .bind(req.full_name.trim())
            .bind(&req.title)
            .bind(&req.talk_title)
            .bind(&req.bio)
            .bind(&req.image_url)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateSpeakerRequest,
    ) -> Result<Option<SpeakerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_speaker");
        let sql = format!(
            r#"
            UPDATE speakers
            SET event_id = COALESCE($2, event_id),
                full_name = COALESCE($3, full_name),
                title = COALESCE($4, title),
                talk_title = COALESCE($5, talk_title),
                bio = COALESCE($6, bio),
                image_url = COALESCE($7, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SPEAKER_COLUMNS
        );
        let result = sqlx::query_as::<_, SpeakerEntity>(&sql)
            .bind(id)
            .bind(req.event_id)
            .bind(req.full_name.as_deref().map(str::trim))
            .bind(&req.title)
            .bind(&req.talk_title)
            .bind(&req.bio)
            .bind(&req.image_url)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_speaker");
        let result = sqlx::query("DELETE FROM speakers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
