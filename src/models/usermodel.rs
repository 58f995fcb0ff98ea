use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    User,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SuperAdmin)
    }
}

/// A marketplace account. Balance fields are running ledgers in cents:
/// `gift_credits` is earned per verified subscription and spendable at half
/// value on withdrawal, `referral_balance` accrues commission and is drained
/// fully by a withdrawal request.
#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,

    pub gift_credits: i64,
    pub referral_balance: i64,
    pub total_earnings: i64,
    pub withdrawn_amount: i64,

    pub referral_code: Option<String>,
    pub referred_by: Option<uuid::Uuid>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_str_mapping() {
        assert_eq!(UserRole::SuperAdmin.to_str(), "super_admin");
        assert_eq!(UserRole::Admin.to_str(), "admin");
        assert_eq!(UserRole::User.to_str(), "user");
    }

    #[test]
    fn admin_check_covers_both_admin_roles() {
        assert!(UserRole::Admin.is_admin());
        assert!(UserRole::SuperAdmin.is_admin());
        assert!(!UserRole::User.is_admin());
    }
}
