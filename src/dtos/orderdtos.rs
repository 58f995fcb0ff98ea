// dtos/orderdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::ordermodel::{Order, OrderStatus},
    utils::currency::from_cents,
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDto {
    #[validate(length(min = 1, message = "YouTube link is required"))]
    pub youtube_link: String,

    #[validate(length(min = 2, max = 50, message = "Channel name must be between 2-50 characters"))]
    pub channel_name: String,

    #[validate(length(min = 1, message = "Thumbnail is required"))]
    pub thumbnail: String,

    #[validate(length(min = 1, message = "Payment screenshot is required"))]
    pub payment_screenshot: String,

    pub amount_paid: f64,

    #[validate(length(min = 10, max = 500, message = "Description must be between 10-500 characters"))]
    pub description: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDto {
    pub youtube_link: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Channel name must be between 2-50 characters"))]
    pub channel_name: Option<String>,

    pub thumbnail: Option<String>,

    pub payment_screenshot: Option<String>,

    pub amount_paid: Option<f64>,

    #[validate(length(min = 10, max = 500, message = "Description must be between 10-500 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub youtube_link: String,
    pub channel_name: String,
    pub thumbnail: String,
    pub payment_screenshot: Option<String>,
    pub description: String,
    pub amount_paid: f64,
    pub subscriber_target: i32,
    pub subscribed_count: i32,
    pub remaining_subscribers: i32,
    pub progress: String,
    pub status: OrderStatus,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponseDto {
    fn from(order: Order) -> Self {
        Self {
            remaining_subscribers: order.remaining_subscribers(),
            progress: format!("{:.1}", order.progress_percent()),
            id: order.id,
            user_id: order.user_id,
            youtube_link: order.youtube_link,
            channel_name: order.channel_name,
            thumbnail: order.thumbnail,
            payment_screenshot: order.payment_screenshot,
            description: order.description,
            amount_paid: from_cents(order.amount_paid),
            subscriber_target: order.subscriber_target,
            subscribed_count: order.subscribed_count,
            status: order.status,
            verified_by: order.verified_by,
            verified_at: order.verified_at,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_carries_virtual_fields() {
        let order = Order {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            youtube_link: "https://youtube.com/@c".to_string(),
            channel_name: "c".to_string(),
            thumbnail: "t.png".to_string(),
            payment_screenshot: None,
            description: "a description".to_string(),
            amount_paid: 100_000,
            subscriber_target: 100,
            subscribed_count: 33,
            status: OrderStatus::Active,
            verified_by: None,
            verified_at: None,
            created_at: None,
            updated_at: None,
        };

        let dto = OrderResponseDto::from(order);
        assert_eq!(dto.amount_paid, 1000.0);
        assert_eq!(dto.remaining_subscribers, 67);
        assert_eq!(dto.progress, "33.0");
    }
}
