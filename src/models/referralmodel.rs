use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "referral_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    Pending,
    Eligible,
    Paid,
    Reversed,
}

/// A commission event: created when a referred user's qualifying order gets
/// its funding verified. (referrer_id, order_id) is unique, which is what
/// makes commission processing idempotent.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Referral {
    pub id: Uuid,
    pub referrer_id: Uuid,
    pub referee_id: Uuid,
    pub order_id: Uuid,
    /// Commission amount in cents.
    pub amount: i64,
    pub status: ReferralStatus,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReferralStats {
    pub balance: i64,
    pub total_earnings: i64,
    pub withdrawn: i64,
    pub referral_code: Option<String>,
    pub recent_referrals: Vec<Referral>,
}
