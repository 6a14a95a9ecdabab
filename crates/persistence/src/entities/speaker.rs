//! Speaker entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the speakers table.
#[derive(Debug, Clone, FromRow)]
pub struct SpeakerEntity {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub full_name: String,
    pub title: Option<String>,
    pub talk_title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SpeakerEntity> for domain::models::Speaker {
    fn from(entity: SpeakerEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            full_name: entity.full_name,
            title: entity.title,
            talk_title: entity.talk_title,
            bio: entity.bio,
            image_url: entity.image_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
