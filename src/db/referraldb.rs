// db/referraldb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::referralmodel::Referral;

#[async_trait]
pub trait ReferralExt {
    async fn get_referrals_for_referrer(
        &self,
        referrer_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Referral>, sqlx::Error>;
}

#[async_trait]
impl ReferralExt for DBClient {
    async fn get_referrals_for_referrer(
        &self,
        referrer_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Referral>, sqlx::Error> {
        sqlx::query_as::<_, Referral>(
            r#"
            SELECT id, referrer_id, referee_id, order_id, amount, status, created_at
            FROM referrals
            WHERE referrer_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(referrer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
