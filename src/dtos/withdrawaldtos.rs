// dtos/withdrawaldtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::withdrawalmodel::{PayoutMethod, Withdrawal, WithdrawalStatus},
    utils::currency::from_cents,
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithdrawalDto {
    #[validate(length(min = 1, message = "Account number is required"))]
    pub account_number: String,

    #[validate(length(min = 1, message = "Account holder name is required"))]
    pub account_holder_name: String,

    #[validate(length(min = 1, message = "Bank name is required"))]
    pub bank_name: String,

    pub method: PayoutMethod,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalDecision {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessWithdrawalDto {
    pub status: WithdrawalDecision,
    pub note: Option<String>,
}

/// Shape returned on creation: the computed money movement plus status.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedWithdrawalDto {
    pub id: Uuid,
    pub amount: f64,
    pub fee: f64,
    pub net_amount: f64,
    pub status: WithdrawalStatus,
}

impl From<&Withdrawal> for CreatedWithdrawalDto {
    fn from(withdrawal: &Withdrawal) -> Self {
        Self {
            id: withdrawal.id,
            amount: from_cents(withdrawal.amount),
            fee: from_cents(withdrawal.fee),
            net_amount: from_cents(withdrawal.amount),
            status: withdrawal.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalHistoryDto {
    pub id: Uuid,
    pub amount: f64,
    pub fee: f64,
    pub method: PayoutMethod,
    pub status: WithdrawalStatus,
    pub account_number: String,
    pub verification_note: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureDetailsDto {
    pub account_number: String,
    pub account_holder_name: String,
    pub bank_name: String,
}
