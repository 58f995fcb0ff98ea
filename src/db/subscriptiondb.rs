// db/subscriptiondb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::subscriptionmodel::Subscription;

#[async_trait]
pub trait SubscriptionExt {
    async fn get_subscription(
        &self,
        subscription_id: Uuid,
    ) -> Result<Option<Subscription>, sqlx::Error>;

    async fn get_user_subscriptions(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Subscription>, sqlx::Error>;

    /// The manual review queue: claims that failed automatic verification.
    async fn get_unverified_subscriptions(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Subscription>, sqlx::Error>;
}

#[async_trait]
impl SubscriptionExt for DBClient {
    async fn get_subscription(
        &self,
        subscription_id: Uuid,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        sqlx::query_as::<_, Subscription>(
            r#"
            SELECT id, user_id, order_id, screenshot, verified, created_at, updated_at
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(subscription_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_subscriptions(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        sqlx::query_as::<_, Subscription>(
            r#"
            SELECT id, user_id, order_id, screenshot, verified, created_at, updated_at
            FROM subscriptions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_unverified_subscriptions(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        sqlx::query_as::<_, Subscription>(
            r#"
            SELECT id, user_id, order_id, screenshot, verified, created_at, updated_at
            FROM subscriptions
            WHERE verified = false
            ORDER BY created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }
}
