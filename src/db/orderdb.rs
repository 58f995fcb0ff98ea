// db/orderdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::ordermodel::{Order, OrderStatus};

#[async_trait]
pub trait OrderExt {
    #[allow(clippy::too_many_arguments)]
    async fn save_order(
        &self,
        user_id: Uuid,
        youtube_link: String,
        channel_name: String,
        thumbnail: String,
        payment_screenshot: String,
        description: String,
        amount_paid: i64,
        subscriber_target: i32,
    ) -> Result<Order, sqlx::Error>;

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, sqlx::Error>;

    /// All orders, newest first. Admin view.
    async fn get_all_orders(&self, page: u32, limit: usize) -> Result<Vec<Order>, sqlx::Error>;

    /// Orders a regular user may browse: every active order plus their own.
    async fn get_visible_orders(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Order>, sqlx::Error>;
}

#[async_trait]
impl OrderExt for DBClient {
    async fn save_order(
        &self,
        user_id: Uuid,
        youtube_link: String,
        channel_name: String,
        thumbnail: String,
        payment_screenshot: String,
        description: String,
        amount_paid: i64,
        subscriber_target: i32,
    ) -> Result<Order, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
            (user_id, youtube_link, channel_name, thumbnail, payment_screenshot,
             description, amount_paid, subscriber_target)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, user_id, youtube_link, channel_name, thumbnail,
                payment_screenshot, description, amount_paid, subscriber_target,
                subscribed_count, status, verified_by, verified_at,
                created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(youtube_link)
        .bind(channel_name)
        .bind(thumbnail)
        .bind(payment_screenshot)
        .bind(description)
        .bind(amount_paid)
        .bind(subscriber_target)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_order(&self, order_id: Uuid) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, user_id, youtube_link, channel_name, thumbnail,
                payment_screenshot, description, amount_paid, subscriber_target,
                subscribed_count, status, verified_by, verified_at,
                created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_all_orders(&self, page: u32, limit: usize) -> Result<Vec<Order>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, user_id, youtube_link, channel_name, thumbnail,
                payment_screenshot, description, amount_paid, subscriber_target,
                subscribed_count, status, verified_by, verified_at,
                created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_visible_orders(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, user_id, youtube_link, channel_name, thumbnail,
                payment_screenshot, description, amount_paid, subscriber_target,
                subscribed_count, status, verified_by, verified_at,
                created_at, updated_at
            FROM orders
            WHERE status = $1 OR user_id = $2
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(OrderStatus::Active)
        .bind(user_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }
}
