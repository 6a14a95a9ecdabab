//! Partner entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::PartnerTier;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for partner_tier that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "partner_tier", rename_all = "lowercase")]
pub enum PartnerTierDb {
    Main,
    Gold,
    Silver,
    Community,
}

impl From<PartnerTierDb> for PartnerTier {
    fn from(db_tier: PartnerTierDb) -> Self {
        match db_tier {
            PartnerTierDb::Main => PartnerTier::Main,
            PartnerTierDb::Gold => PartnerTier::Gold,
            PartnerTierDb::Silver => PartnerTier::Silver,
            PartnerTierDb::Community => PartnerTier::Community,
        }
    }
}

impl From<PartnerTier> for PartnerTierDb {
    fn from(tier: PartnerTier) -> Self {
        match tier {
            PartnerTier::Main => PartnerTierDb::Main,
            PartnerTier::Gold => PartnerTierDb::Gold,
            PartnerTier::Silver => PartnerTierDb::Silver,
            PartnerTier::Community => PartnerTierDb::Community,
        }
    }
}

/// Database row mapping for the partners table.
#[derive(Debug, Clone, FromRow)]
pub struct PartnerEntity {
    pub id: Uuid,
    pub name: String,
    pub tier: PartnerTierDb,
    pub website_url: Option<String>,
    pub logo_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PartnerEntity> for domain::models::Partner {
    fn from(entity: PartnerEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            tier: entity.tier.into(),
            website_url: entity.website_url,
            logo_url: entity.logo_url,
            display_order: entity.display_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
