//! Team member repository for database operations.

use domain::models::team_member::{CreateTeamMemberRequest, UpdateTeamMemberRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TeamMemberEntity;
use crate::metrics::QueryTimer;

const TEAM_COLUMNS: &str = "id, full_name, position, department, bio, email, linkedin_url, image_url, is_visible, display_order, created_at, updated_at";

/// Repository for organizing team members.
#[derive(Clone)]
pub struct TeamMemberRepository {
    pool: PgPool,
}

impl TeamMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// List members shown on the public site.
    pub async fn list_visible(&self) -> Result<Vec<TeamMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_visible_team_members");
        let sql = format!(
            "SELECT {} FROM team_members WHERE is_visible = true ORDER BY display_order ASC, full_name ASC",
            TEAM_COLUMNS
        );
        let result = sqlx::query_as::<_, TeamMemberEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// List all members for the admin view, optionally filtered by department.
    pub async fn list(
        &self,
        department: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TeamMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_team_members");
        let sql = format!(
            r#"
            SELECT {}
            FROM team_members
            WHERE ($1::TEXT IS NULL OR department ILIKE $1)
            ORDER BY display_order ASC, full_name ASC
            LIMIT $2 OFFSET $3
            "#,
            TEAM_COLUMNS
        );
        let result = sqlx::query_as::<_, TeamMemberEntity>(&sql)
            .bind(department)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn count(&self, department: Option<&str>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_team_members");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM team_members WHERE ($1::TEXT IS NULL OR department ILIKE $1)",
        )
        .bind(department)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All members in display order, for the spreadsheet export.
    pub async fn list_all(&self) -> Result<Vec<TeamMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_team_members");
        let sql = format!(
            "SELECT {} FROM team_members ORDER BY display_order ASC, full_name ASC",
            TEAM_COLUMNS
        );
        let result = sqlx::query_as::<_, TeamMemberEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_team_member_by_id");
        let sql = format!("SELECT {} FROM team_members WHERE id = $1", TEAM_COLUMNS);
        let result = sqlx::query_as::<_, TeamMemberEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        req: &CreateTeamMemberRequest,
    ) -> Result<TeamMemberEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_team_member");
        let sql = format!(
            r#"
            INSERT INTO team_members
                (full_name, position, department, bio, email, linkedin_url, is_visible, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            TEAM_COLUMNS
        );
        let result = sqlx::query_as::<_, TeamMemberEntity>(&sql)
            .bind(req.full_name.trim())
            .bind(req.position.trim())
            .bind(&req.department)
            .bind(&req.bio)
            .bind(&req.email)
            .bind(&req.linkedin_url)
            .bind(req.is_visible)
            .bind(req.display_order)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Update a member. Absent fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateTeamMemberRequest,
    ) -> Result<Option<TeamMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_team_member");
        let sql = format!(
            r#"
            UPDATE team_members
            SET full_name = COALESCE($2, full_name),
                position = COALESCE($3, position),
                department = COALESCE($4, department),
                bio = COALESCE($5, bio),
                email = COALESCE($6, email),
                linkedin_url = COALESCE($7, linkedin_url),
                is_visible = COALESCE($8, is_visible),
                display_order = COALESCE($9, display_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            TEAM_COLUMNS
        );
        let result = sqlx::query_as::<_, TeamMemberEntity>(&sql)
            .bind(id)
            .bind(req.full_name.as_deref().map(str::trim))
            .bind(req.position.as_deref().map(str::trim))
            .bind(&req.department)
            .bind(&req.bio)
            .bind(&req.email)
            .bind(&req.linkedin_url)
            .bind(req.is_visible)
            .bind(req.display_order)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Flip a member's visibility. Returns the new value.
    pub async fn toggle_visibility(&self, id: Uuid) -> Result<Option<bool>, sqlx::Error> {
        let timer = QueryTimer::new("toggle_team_member_visibility");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            UPDATE team_members
            SET is_visible = NOT is_visible, updated_at = NOW()
            WHERE id = $1
            RETURNING is_visible
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn set_image_url(
        &self,
        id: Uuid,
        image_url: &str,
    ) -> Result<Option<TeamMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_team_member_image");
        let sql = format!(
            "UPDATE team_members SET image_url = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            TEAM_COLUMNS
        );
        let result = sqlx::query_as::<_, TeamMemberEntity>(&sql)
            .bind(id)
            .bind(image_url)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_team_member");
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
