// service/subscription_service.rs
use std::sync::Arc;

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    db::{db::DBClient, orderdb::OrderExt},
    models::{
        ordermodel::{Order, OrderStatus},
        subscriptionmodel::Subscription,
        usermodel::User,
    },
    service::{
        error::ServiceError, order_service::is_image_ref,
        verification_service::VerificationService,
    },
};

const ORDER_COLUMNS: &str = r#"
    id, user_id, youtube_link, channel_name, thumbnail,
    payment_screenshot, description, amount_paid, subscriber_target,
    subscribed_count, status, verified_by, verified_at,
    created_at, updated_at
"#;

const SUBSCRIPTION_COLUMNS: &str =
    "id, user_id, order_id, screenshot, verified, created_at, updated_at";

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Screenshot passed automatic verification; order progress and the
    /// subscriber's gift credits were updated in the same transaction.
    Verified(Subscription),
    /// Automatic verification failed; the claim is stored unverified and
    /// waits for manual admin review.
    PendingReview(Subscription),
}

/// Records subscription claims against active orders and applies their
/// ledger effects atomically.
#[derive(Clone)]
pub struct SubscriptionService {
    db_client: Arc<DBClient>,
    verification_service: Arc<VerificationService>,
    subscription_reward: i64,
}

impl SubscriptionService {
    pub fn new(
        db_client: Arc<DBClient>,
        verification_service: Arc<VerificationService>,
        subscription_reward: i64,
    ) -> Self {
        Self {
            db_client,
            verification_service,
            subscription_reward,
        }
    }

    pub async fn submit(
        &self,
        subscriber: &User,
        order_id: Uuid,
        screenshot: String,
    ) -> Result<SubmissionOutcome, ServiceError> {
        if !is_image_ref(&screenshot) {
            return Err(ServiceError::Validation(
                "Screenshot must be an image file".to_string(),
            ));
        }

        let order = self
            .db_client
            .get_order(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound(order_id))?;

        if order.user_id == subscriber.id {
            return Err(ServiceError::OwnOrderSubscription(order_id));
        }
        if order.status != OrderStatus::Active {
            return Err(ServiceError::OrderNotActive(order_id));
        }
        if self.claim_exists(subscriber.id, order_id).await? {
            return Err(ServiceError::DuplicateSubscription {
                user_id: subscriber.id,
                order_id,
            });
        }

        // OCR runs outside the transaction; it is slow, external I/O and
        // holding row locks across it would serialize every submission.
        let verified = self
            .verification_service
            .verify_subscription_proof(&order.youtube_link, &screenshot)
            .await?;

        let mut tx = self.db_client.pool.begin().await?;

        // Re-read under lock: the order may have completed or been canceled
        // while the OCR call was in flight.
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::OrderNotFound(order_id))?;

        if order.status != OrderStatus::Active {
            return Err(ServiceError::OrderNotActive(order_id));
        }

        let subscription = self
            .insert_subscription(&mut tx, subscriber.id, order_id, &screenshot, verified)
            .await?;

        if !verified {
            tx.commit().await?;
            return Ok(SubmissionOutcome::PendingReview(subscription));
        }

        self.record_progress_and_reward(&mut tx, &order, subscriber.id)
            .await?;

        tx.commit().await?;
        Ok(SubmissionOutcome::Verified(subscription))
    }

    /// Admin override for claims automatic verification could not settle.
    /// Applies the same order progress and ledger credit as the automatic
    /// path, atomically.
    pub async fn manual_verify(
        &self,
        subscription_id: Uuid,
    ) -> Result<Subscription, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let subscription = sqlx::query_as::<_, Subscription>(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = $1 FOR UPDATE"
        ))
        .bind(subscription_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::SubscriptionNotFound(subscription_id))?;

        if subscription.verified {
            return Err(ServiceError::AlreadyVerified(subscription_id));
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(subscription.order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::OrderNotFound(subscription.order_id))?;

        if order.status != OrderStatus::Active {
            return Err(ServiceError::OrderNotActive(order.id));
        }

        self.record_progress_and_reward(&mut tx, &order, subscription.user_id)
            .await?;

        let subscription = sqlx::query_as::<_, Subscription>(&format!(
            r#"
            UPDATE subscriptions
            SET verified = true, updated_at = NOW()
            WHERE id = $1
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        ))
        .bind(subscription_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(subscription)
    }

    async fn claim_exists(&self, user_id: Uuid, order_id: Uuid) -> Result<bool, ServiceError> {
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM subscriptions WHERE user_id = $1 AND order_id = $2",
        )
        .bind(user_id)
        .bind(order_id)
        .fetch_one(&self.db_client.pool)
        .await?;

        Ok(existing > 0)
    }

    async fn insert_subscription(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: Uuid,
        order_id: Uuid,
        screenshot: &str,
        verified: bool,
    ) -> Result<Subscription, ServiceError> {
        sqlx::query_as::<_, Subscription>(&format!(
            r#"
            INSERT INTO subscriptions (user_id, order_id, screenshot, verified)
            VALUES ($1, $2, $3, $4)
            RETURNING {SUBSCRIPTION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(order_id)
        .bind(screenshot)
        .bind(verified)
        .fetch_one(&mut **tx)
        .await
        .map_err(|err| match &err {
            // The unique (user, order) index is the real duplicate guard; the
            // pre-check only exists to skip OCR work.
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ServiceError::DuplicateSubscription { user_id, order_id }
            }
            _ => ServiceError::Database(err),
        })
    }

    /// Subscriber progress plus the gift-credit reward, inside the caller's
    /// transaction. Completes the order when the target is reached; refuses
    /// to push the count past the target.
    async fn record_progress_and_reward(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &Order,
        subscriber_id: Uuid,
    ) -> Result<(), ServiceError> {
        let new_count = order.subscribed_count + 1;
        if new_count > order.subscriber_target {
            return Err(ServiceError::SubscriberTargetExceeded {
                order_id: order.id,
                count: new_count,
                target: order.subscriber_target,
            });
        }

        let new_status = if new_count >= order.subscriber_target {
            OrderStatus::Completed
        } else {
            order.status
        };

        sqlx::query(
            r#"
            UPDATE orders
            SET subscribed_count = $2, status = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(order.id)
        .bind(new_count)
        .bind(new_status)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET gift_credits = gift_credits + $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(subscriber_id)
        .bind(self.subscription_reward)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
