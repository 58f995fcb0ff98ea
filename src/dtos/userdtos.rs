// dtos/userdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{models::usermodel::User, utils::currency::from_cents};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
        }
    }
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RequestQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub gift_credits: f64,
    pub referral_balance: f64,
    pub total_earnings: f64,
    pub withdrawn_amount: f64,
    pub referral_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_str().to_string(),
            gift_credits: from_cents(user.gift_credits),
            referral_balance: from_cents(user.referral_balance),
            total_earnings: from_cents(user.total_earnings),
            withdrawn_amount: from_cents(user.withdrawn_amount),
            referral_code: user.referral_code.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub name: String,
    pub email: String,
    pub total_earnings: f64,
    pub gift_credits: f64,
    pub withdrawn_amount: f64,
}

impl From<&User> for LeaderboardEntryDto {
    fn from(user: &User) -> Self {
        LeaderboardEntryDto {
            name: user.name.clone(),
            email: user.email.clone(),
            total_earnings: from_cents(user.total_earnings),
            gift_credits: from_cents(user.gift_credits),
            withdrawn_amount: from_cents(user.withdrawn_amount),
        }
    }
}
