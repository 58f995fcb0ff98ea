use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "withdrawal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payout_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    Bank,
    MobileMoney,
}

/// A payout request. The deduction columns capture exactly what was taken
/// from the user's balances at creation time; rejection restores those
/// captured amounts, never recomputed ones.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Withdrawal {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Net amount payable in cents (after fee).
    pub amount: i64,
    pub fee: i64,
    pub method: PayoutMethod,
    pub status: WithdrawalStatus,
    pub gift_credits_deducted: i64,
    pub referral_deducted: i64,
    // Bank details, encrypted at rest.
    pub account_number_enc: String,
    pub account_holder_enc: String,
    pub bank_name_enc: String,
    pub verified_by: Option<Uuid>,
    pub verification_note: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
