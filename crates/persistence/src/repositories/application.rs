//! Application (form submission) repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ApplicationEntity, ApplicationKindDb, ApplicationStatusDb};
use crate::metrics::QueryTimer;

const APPLICATION_COLUMNS: &str =
    "id, kind, full_name, email, answers, status, created_at, updated_at";

#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Store a validated submission with status `received`.
    pub async fn create(
        &self,
        kind: ApplicationKindDb,
        full_name: &str,
        email: &str,
        answers: &serde_json::Value,
    ) -> Result<ApplicationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_application");
        let sql = format!(
            r#"
            INSERT INTO applications (kind, full_name, email, answers, status)
            VALUES ($1, $2, $3, $4, 'received')
            RETURNING {}
            "#,
            APPLICATION_COLUMNS
        );
        let result = sqlx::query_as::<_, ApplicationEntity>(&sql)
            .bind(kind)
            .bind(full_name)
            .bind(email)
            .bind(answers)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn list(
        &self,
        kind: Option<ApplicationKindDb>,
        status: Option<ApplicationStatusDb>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ApplicationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_applications");
        let sql = format!(
            r#"
            SELECT {}
            FROM applications
            WHERE ($1::application_kind IS NULL OR kind = $1)
              AND ($2::application_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            APPLICATION_COLUMNS
        );
        let result = sqlx::query_as::<_, ApplicationEntity>(&sql)
            .bind(kind)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn count(
        &self,
        kind: Option<ApplicationKindDb>,
        status: Option<ApplicationStatusDb>,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_applications");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM applications
            WHERE ($1::application_kind IS NULL OR kind = $1)
              AND ($2::application_status IS NULL OR status = $2)
            "#,
        )
        .bind(kind)
        .bind(status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatusDb,
    ) -> Result<Option<ApplicationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_application_status");
        let sql = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            APPLICATION_COLUMNS
        );
        let result = sqlx::query_as::<_, ApplicationEntity>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }
}
