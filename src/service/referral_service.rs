// service/referral_service.rs
use std::sync::Arc;

use rand::{distr::Alphanumeric, Rng};

use crate::{
    config::Config,
    db::{db::DBClient, referraldb::ReferralExt, userdb::UserExt},
    models::{
        ordermodel::Order,
        referralmodel::{Referral, ReferralStats, ReferralStatus},
        usermodel::User,
    },
    service::error::ServiceError,
    utils::currency::apply_bps,
};

pub fn generate_referral_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

pub fn generate_referral_link(base_url: &str, code: &str) -> String {
    format!("{}/register?ref={}", base_url, code)
}

pub fn commission_for(amount_paid: i64, commission_rate_bps: i64) -> i64 {
    apply_bps(amount_paid, commission_rate_bps)
}

/// Credits a referrer when a referred user's funded order is verified.
#[derive(Clone)]
pub struct ReferralService {
    db_client: Arc<DBClient>,
    commission_rate_bps: i64,
    min_order_amount: i64,
    app_url: String,
}

impl ReferralService {
    pub fn new(db_client: Arc<DBClient>, config: &Config) -> Self {
        Self {
            db_client,
            commission_rate_bps: config.commission_rate_bps,
            min_order_amount: config.min_order_amount,
            app_url: config.app_url.clone(),
        }
    }

    /// No-op when the owner has no referrer or the order is below the
    /// qualifying amount. The unique (referrer, order) key makes repeated
    /// invocations for the same order a no-op instead of a double credit.
    pub async fn process_commission(
        &self,
        order: &Order,
    ) -> Result<Option<Referral>, ServiceError> {
        let owner = self
            .db_client
            .get_user(Some(order.user_id), None)
            .await?
            .ok_or(ServiceError::UserNotFound(order.user_id))?;

        let Some(referrer_id) = owner.referred_by else {
            return Ok(None);
        };
        if order.amount_paid < self.min_order_amount {
            return Ok(None);
        }

        let commission = commission_for(order.amount_paid, self.commission_rate_bps);

        let mut tx = self.db_client.pool.begin().await?;

        let referral = sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referrals (referrer_id, referee_id, order_id, amount, status)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (referrer_id, order_id) DO NOTHING
            RETURNING id, referrer_id, referee_id, order_id, amount, status, created_at
            "#,
        )
        .bind(referrer_id)
        .bind(owner.id)
        .bind(order.id)
        .bind(commission)
        .bind(ReferralStatus::Eligible)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(referral) = referral else {
            tx.rollback().await?;
            tracing::warn!(
                "Commission for order {} already credited to referrer {}",
                order.id,
                referrer_id
            );
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE users
            SET referral_balance = referral_balance + $2,
                total_earnings = total_earnings + $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(referrer_id)
        .bind(commission)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(referral))
    }

    pub async fn apply_referral_code(&self, user: &User, code: &str) -> Result<(), ServiceError> {
        if user.referred_by.is_some() {
            return Err(ServiceError::AlreadyReferred(user.id));
        }

        let referrer = self
            .db_client
            .get_user_by_referral_code(code)
            .await?
            .ok_or_else(|| ServiceError::InvalidReferralCode(code.to_string()))?;

        if referrer.id == user.id {
            return Err(ServiceError::SelfReferral);
        }

        // referred_by is write-once; a concurrent apply loses here.
        let updated = self.db_client.set_referred_by(user.id, referrer.id).await?;
        if updated.is_none() {
            return Err(ServiceError::AlreadyReferred(user.id));
        }

        Ok(())
    }

    pub async fn referral_stats(&self, user: &User) -> Result<ReferralStats, ServiceError> {
        let referral_code = Some(self.ensure_referral_code(user).await?);
        let recent_referrals = self
            .db_client
            .get_referrals_for_referrer(user.id, 10)
            .await?;

        Ok(ReferralStats {
            balance: user.referral_balance,
            total_earnings: user.total_earnings,
            withdrawn: user.withdrawn_amount,
            referral_code,
            recent_referrals,
        })
    }

    pub async fn ensure_referral_code(&self, user: &User) -> Result<String, ServiceError> {
        if let Some(code) = &user.referral_code {
            return Ok(code.clone());
        }

        let code = generate_referral_code();
        self.db_client
            .update_user_referral_code(user.id, code.clone())
            .await?;
        Ok(code)
    }

    pub fn referral_link(&self, code: &str) -> String {
        generate_referral_link(&self.app_url, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_is_rate_applied_to_amount() {
        // 1% of 1000.00 paid
        assert_eq!(commission_for(100_000, 100), 1_000);
        // 1% of 500.00
        assert_eq!(commission_for(50_000, 100), 500);
        assert_eq!(commission_for(0, 100), 0);
    }

    #[test]
    fn referral_code_shape() {
        let code = generate_referral_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn referral_link_embeds_code() {
        assert_eq!(
            generate_referral_link("https://noko.app", "AB12CD34"),
            "https://noko.app/register?ref=AB12CD34"
        );
    }
}
