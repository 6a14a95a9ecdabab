//! Newsletter subscription repository.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{NewsletterSubscriptionEntity, SubscriptionStatusDb};
use crate::metrics::QueryTimer;

/// Repository for newsletter subscriptions.
#[derive(Clone)]
pub struct NewsletterRepository {
    pool: PgPool,
}

impl NewsletterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Subscribe an address. An existing address, in any status, fails with
    /// a unique violation and leaves the table unchanged.
    pub async fn subscribe(
        &self,
        email: &str,
    ) -> Result<NewsletterSubscriptionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_newsletter_subscription");
        let result = sqlx::query_as::<_, NewsletterSubscriptionEntity>(
            r#"
            INSERT INTO newsletter_subscriptions (email, status)
            VALUES ($1, 'active')
            RETURNING id, email, status, subscribed_at, updated_at
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list(
        &self,
        status: Option<SubscriptionStatusDb>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NewsletterSubscriptionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_newsletter_subscriptions");
        let result = sqlx::query_as::<_, NewsletterSubscriptionEntity>(
            r#"
            SELECT id, email, status, subscribed_at, updated_at
            FROM newsletter_subscriptions
            WHERE ($1::subscription_status IS NULL OR status = $1)
            ORDER BY subscribed_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn count(&self, status: Option<SubscriptionStatusDb>) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_newsletter_subscriptions");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM newsletter_subscriptions
            WHERE ($1::subscription_status IS NULL OR status = $1)
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All subscriptions, oldest first, for the spreadsheet export.
    pub async fn list_all(&self) -> Result<Vec<NewsletterSubscriptionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_newsletter_subscriptions");
        let result = sqlx::query_as::<_, NewsletterSubscriptionEntity>(
            r#"
            SELECT id, email, status, subscribed_at, updated_at
            FROM newsletter_subscriptions
            ORDER BY subscribed_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: SubscriptionStatusDb,
    ) -> Result<Option<NewsletterSubscriptionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_newsletter_subscription_status");
        let result = sqlx::query_as::<_, NewsletterSubscriptionEntity>(
            r#"
            UPDATE newsletter_subscriptions
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, status, subscribed_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_newsletter_subscription");
        let result = sqlx::query("DELETE FROM newsletter_subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
