use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's claim of having subscribed to an order's channel. At most one
/// record exists per (user, order); `verified` flips from false to true
/// exactly once and never back.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub screenshot: String,
    pub verified: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
