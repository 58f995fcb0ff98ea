// dtos/subscriptiondtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::subscriptionmodel::Subscription;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeDto {
    pub order_id: Uuid,

    #[validate(length(min = 1, message = "Screenshot is required"))]
    pub screenshot: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub screenshot: String,
    pub verified: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Subscription> for SubscriptionResponseDto {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id,
            user_id: subscription.user_id,
            order_id: subscription.order_id,
            screenshot: subscription.screenshot,
            verified: subscription.verified,
            created_at: subscription.created_at,
            updated_at: subscription.updated_at,
        }
    }
}
