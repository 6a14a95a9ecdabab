//! Newsletter subscription entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SubscriptionStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for subscription_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "subscription_status", rename_all = "lowercase")]
pub enum SubscriptionStatusDb {
    Active,
    Unsubscribed,
}

impl From<SubscriptionStatusDb> for SubscriptionStatus {
    fn from(db_status: SubscriptionStatusDb) -> Self {
        match db_status {
            SubscriptionStatusDb::Active => SubscriptionStatus::Active,
            SubscriptionStatusDb::Unsubscribed => SubscriptionStatus::Unsubscribed,
        }
    }
}

impl From<SubscriptionStatus> for SubscriptionStatusDb {
    fn from(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::Active => SubscriptionStatusDb::Active,
            SubscriptionStatus::Unsubscribed => SubscriptionStatusDb::Unsubscribed,
        }
    }
}

/// Database row mapping for the newsletter_subscriptions table.
#[derive(Debug, Clone, FromRow)]
pub struct NewsletterSubscriptionEntity {
    pub id: Uuid,
    pub email: String,
    pub status: SubscriptionStatusDb,
    pub subscribed_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NewsletterSubscriptionEntity> for domain::models::NewsletterSubscription {
    fn from(entity: NewsletterSubscriptionEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            status: entity.status.into(),
            subscribed_at: entity.subscribed_at,
            updated_at: entity.updated_at,
        }
    }
}
