// dtos/referraldtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::referralmodel::{Referral, ReferralStats, ReferralStatus},
    utils::currency::from_cents,
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReferralDto {
    #[validate(length(min = 1, message = "Referral code is required"))]
    pub referral_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralDto {
    pub id: Uuid,
    pub referee_id: Uuid,
    pub order_id: Uuid,
    pub amount: f64,
    pub status: ReferralStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Referral> for ReferralDto {
    fn from(referral: Referral) -> Self {
        Self {
            id: referral.id,
            referee_id: referral.referee_id,
            order_id: referral.order_id,
            amount: from_cents(referral.amount),
            status: referral.status,
            created_at: referral.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralStatsDto {
    pub balance: f64,
    pub total_earnings: f64,
    pub withdrawn: f64,
    pub referral_code: Option<String>,
    pub referral_link: Option<String>,
    pub recent_referrals: Vec<ReferralDto>,
}

impl ReferralStatsDto {
    pub fn from_stats(stats: ReferralStats, referral_link: Option<String>) -> Self {
        Self {
            balance: from_cents(stats.balance),
            total_earnings: from_cents(stats.total_earnings),
            withdrawn: from_cents(stats.withdrawn),
            referral_code: stats.referral_code,
            referral_link,
            recent_referrals: stats
                .recent_referrals
                .into_iter()
                .map(ReferralDto::from)
                .collect(),
        }
    }
}
