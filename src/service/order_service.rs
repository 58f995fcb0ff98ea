// service/order_service.rs
use std::sync::Arc;

use regex::Regex;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, orderdb::OrderExt, userdb::UserExt},
    dtos::orderdtos::{CreateOrderDto, UpdateOrderDto},
    mail::{mails::send_order_activated_email, sendmail::Mailer},
    models::{
        ordermodel::{
            is_valid_funding_tier, subscriber_target_for, Order, OrderStatus,
            MIN_SUBSCRIBER_TARGET,
        },
        usermodel::User,
    },
    service::{
        error::ServiceError, referral_service::ReferralService,
        verification_service::extract_channel_handle,
    },
    utils::currency::to_cents,
};

const ORDER_COLUMNS: &str = r#"
    id, user_id, youtube_link, channel_name, thumbnail,
    payment_screenshot, description, amount_paid, subscriber_target,
    subscribed_count, status, verified_by, verified_at,
    created_at, updated_at
"#;

pub fn is_youtube_link(link: &str) -> bool {
    let re = Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.?be)/.+").unwrap();
    re.is_match(link)
}

pub fn is_image_ref(reference: &str) -> bool {
    let re = Regex::new(r"(?i)\.(jpg|jpeg|png|webp)$").unwrap();
    re.is_match(reference)
}

/// Governs the order lifecycle: creation (pending), funding verification
/// (active, triggers referral commission), subscriber accrual (completed at
/// target) and cancellation.
#[derive(Clone)]
pub struct OrderService {
    db_client: Arc<DBClient>,
    referral_service: Arc<ReferralService>,
    mailer: Mailer,
}

impl OrderService {
    pub fn new(
        db_client: Arc<DBClient>,
        referral_service: Arc<ReferralService>,
        mailer: Mailer,
    ) -> Self {
        Self {
            db_client,
            referral_service,
            mailer,
        }
    }

    pub async fn create_order(
        &self,
        owner_id: Uuid,
        order_data: CreateOrderDto,
    ) -> Result<Order, ServiceError> {
        let amount_paid = to_cents(order_data.amount_paid);

        if !is_valid_funding_tier(amount_paid) {
            return Err(ServiceError::Validation(
                "Amount paid must be one of the supported funding tiers".to_string(),
            ));
        }
        if !is_youtube_link(&order_data.youtube_link) {
            return Err(ServiceError::Validation(format!(
                "{} is not a valid YouTube link",
                order_data.youtube_link
            )));
        }
        // The verification engine needs an @handle later; reject links it
        // could never verify.
        extract_channel_handle(&order_data.youtube_link)?;

        if !is_image_ref(&order_data.thumbnail) {
            return Err(ServiceError::Validation(
                "Thumbnail must be an image file".to_string(),
            ));
        }
        if !is_image_ref(&order_data.payment_screenshot) {
            return Err(ServiceError::Validation(
                "Payment proof must be an image file".to_string(),
            ));
        }

        let subscriber_target = subscriber_target_for(amount_paid);
        if subscriber_target < MIN_SUBSCRIBER_TARGET {
            return Err(ServiceError::Validation(format!(
                "Subscriber target must be at least {}",
                MIN_SUBSCRIBER_TARGET
            )));
        }

        let order = self
            .db_client
            .save_order(
                owner_id,
                order_data.youtube_link,
                order_data.channel_name,
                order_data.thumbnail,
                order_data.payment_screenshot,
                order_data.description,
                amount_paid,
                subscriber_target,
            )
            .await?;

        Ok(order)
    }

    /// Admin confirmation of the funding proof. Flips the order to active and
    /// triggers the referral commission for the owner's referrer; commission
    /// failure is logged and never rolls the verification back.
    pub async fn verify_funding(
        &self,
        order_id: Uuid,
        admin_id: Uuid,
    ) -> Result<Order, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::OrderNotFound(order_id))?;

        if order.status != OrderStatus::Pending {
            return Err(ServiceError::InvalidOrderStatus(order_id, order.status));
        }
        if order.payment_screenshot.is_none() {
            return Err(ServiceError::MissingFundingProof(order_id));
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $2, verified_by = $3, verified_at = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(OrderStatus::Active)
        .bind(admin_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if let Err(err) = self.referral_service.process_commission(&order).await {
            tracing::error!(
                "Referral commission processing failed for order {}: {}",
                order.id,
                err
            );
        }

        match self.db_client.get_user(Some(order.user_id), None).await {
            Ok(Some(owner)) => {
                send_order_activated_email(
                    &self.mailer,
                    &owner.email,
                    &order.channel_name,
                    order.subscriber_target,
                );
            }
            Ok(None) => {}
            Err(err) => tracing::warn!("Could not load order owner for notification: {}", err),
        }

        Ok(order)
    }

    pub async fn update_order(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        order_data: UpdateOrderDto,
    ) -> Result<Order, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::OrderNotFound(order_id))?;

        if order.user_id != user_id {
            return Err(ServiceError::NotOrderOwner(user_id, order_id));
        }
        if order.status.is_terminal() {
            return Err(ServiceError::InvalidOrderStatus(order_id, order.status));
        }

        let youtube_link = match order_data.youtube_link {
            Some(link) => {
                if !is_youtube_link(&link) {
                    return Err(ServiceError::Validation(format!(
                        "{} is not a valid YouTube link",
                        link
                    )));
                }
                extract_channel_handle(&link)?;
                link
            }
            None => order.youtube_link,
        };
        let channel_name = order_data.channel_name.unwrap_or(order.channel_name);
        let thumbnail = match order_data.thumbnail {
            Some(thumbnail) => {
                if !is_image_ref(&thumbnail) {
                    return Err(ServiceError::Validation(
                        "Thumbnail must be an image file".to_string(),
                    ));
                }
                thumbnail
            }
            None => order.thumbnail,
        };
        let payment_screenshot = match order_data.payment_screenshot {
            Some(screenshot) => {
                if !is_image_ref(&screenshot) {
                    return Err(ServiceError::Validation(
                        "Payment proof must be an image file".to_string(),
                    ));
                }
                Some(screenshot)
            }
            None => order.payment_screenshot,
        };
        let description = order_data.description.unwrap_or(order.description);

        let amount_paid = match order_data.amount_paid {
            Some(amount) => {
                let cents = to_cents(amount);
                if !is_valid_funding_tier(cents) {
                    return Err(ServiceError::Validation(
                        "Amount paid must be one of the supported funding tiers".to_string(),
                    ));
                }
                cents
            }
            None => order.amount_paid,
        };

        // The target is derived from the tier, so a tier change recomputes
        // it. Recorded subscribers must still fit under the new target.
        let subscriber_target = subscriber_target_for(amount_paid);
        if order.subscribed_count > subscriber_target {
            return Err(ServiceError::SubscriberTargetExceeded {
                order_id,
                count: order.subscribed_count,
                target: subscriber_target,
            });
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET youtube_link = $2, channel_name = $3, thumbnail = $4,
                payment_screenshot = $5, description = $6, amount_paid = $7,
                subscriber_target = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(youtube_link)
        .bind(channel_name)
        .bind(thumbnail)
        .bind(payment_screenshot)
        .bind(description)
        .bind(amount_paid)
        .bind(subscriber_target)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(order)
    }

    pub async fn cancel_order(&self, order_id: Uuid, actor: &User) -> Result<Order, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::OrderNotFound(order_id))?;

        if order.status.is_terminal() {
            return Err(ServiceError::InvalidOrderStatus(order_id, order.status));
        }
        if !actor.role.is_admin() && order.user_id != actor.id {
            return Err(ServiceError::NotOrderOwner(actor.id, order_id));
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(OrderStatus::Canceled)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(order)
    }

    pub async fn get_order_for(&self, order_id: Uuid, user: &User) -> Result<Order, ServiceError> {
        let order = self
            .db_client
            .get_order(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound(order_id))?;

        let may_view = user.role.is_admin()
            || order.user_id == user.id
            || order.status == OrderStatus::Active;
        if !may_view {
            return Err(ServiceError::NotOrderOwner(user.id, order_id));
        }

        Ok(order)
    }

    pub async fn list_orders(
        &self,
        user: &User,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Order>, ServiceError> {
        let orders = if user.role.is_admin() {
            self.db_client.get_all_orders(page, limit).await?
        } else {
            self.db_client.get_visible_orders(user.id, page, limit).await?
        };

        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_link_shapes() {
        assert!(is_youtube_link("https://youtube.com/@channel"));
        assert!(is_youtube_link("http://www.youtube.com/@channel/videos"));
        assert!(is_youtube_link("youtu.be/@channel"));
        assert!(!is_youtube_link("https://vimeo.com/@channel"));
        assert!(!is_youtube_link("not a link"));
    }

    #[test]
    fn image_ref_shapes() {
        assert!(is_image_ref("uploads/shot.png"));
        assert!(is_image_ref("proof.JPG"));
        assert!(is_image_ref("thumb.webp"));
        assert!(!is_image_ref("notes.pdf"));
        assert!(!is_image_ref("screenshot"));
    }
}
