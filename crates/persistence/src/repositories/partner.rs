//! Partner repository for database operations.

use domain::models::partner::{CreatePartnerRequest, UpdatePartnerRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{PartnerEntity, PartnerTierDb};
use crate::metrics::QueryTimer;

const PARTNER_COLUMNS: &str =
    "id, name, tier, website_url, logo_url, display_order, created_at, updated_at";

#[derive(Clone)]
pub struct PartnerRepository {
    pool: PgPool,
}

impl PartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List partners by tier (main first), then display order.
    pub async fn list(&self) -> Result<Vec<PartnerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_partners");
        let sql = format!(
            "SELECT {} FROM partners ORDER BY tier ASC, display_order ASC, name ASC",
            PARTNER_COLUMNS
        );
        let result = sqlx::query_as::<_, PartnerEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PartnerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_partner_by_id");
        let sql = format!("SELECT {} FROM partners WHERE id = $1", PARTNER_COLUMNS);
        let result = sqlx::query_as::<_, PartnerEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn create(&self, req: &CreatePartnerRequest) -> Result<PartnerEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_partner");
        let sql = format!(
            r#"
            INSERT INTO partners (name, tier, website_url, logo_url, display_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            PARTNER_COLUMNS
        );
        let result = sqlx::query_as::<_, PartnerEntity>(&sql)
            .bind(req.name.trim())
            .bind(PartnerTierDb::from(req.tier))
            .bind(&req.website_url)
            .bind(&req.logo_url)
            .bind(req.display_order)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdatePartnerRequest,
    ) -> Result<Option<PartnerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_partner");
        let sql = format!(
            r#"
            UPDATE partners
            SET name = COALESCE($2, name),
                tier = COALESCE($3, tier),
                website_url = COALESCE($4, website_url),
                logo_url = COALESCE($5, logo_url),
                display_order = COALESCE($6, display_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PARTNER_COLUMNS
        );
        let result = sqlx::query_as::<_, PartnerEntity>(&sql)
            .bind(id)
            .bind(req.name.as_deref().map(str::trim))
            .bind(req.tier.map(PartnerTierDb::from))
            .bind(&req.website_url)
            .bind(&req.logo_url)
            .bind(req.display_order)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_partner");
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
