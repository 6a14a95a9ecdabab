//! Team member entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the team_members table.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberEntity {
    pub id: Uuid,
    pub full_name: String,
    pub position: String,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub image_url: Option<String>,
    pub is_visible: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeamMemberEntity> for domain::models::TeamMember {
    fn from(entity: TeamMemberEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            position: entity.position,
            department: entity.department,
            bio: entity.bio,
            email: entity.email,
            linkedin_url: entity.linkedin_url,
            image_url: entity.image_url,
            is_visible: entity.is_visible,
            display_order: entity.display_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
