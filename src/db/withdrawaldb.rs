// db/withdrawaldb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::withdrawalmodel::Withdrawal;

pub const WITHDRAWAL_COLUMNS: &str = r#"
    id, user_id, amount, fee, method, status,
    gift_credits_deducted, referral_deducted,
    account_number_enc, account_holder_enc, bank_name_enc,
    verified_by, verification_note, verified_at,
    created_at, updated_at
"#;

#[async_trait]
pub trait WithdrawalExt {
    async fn get_withdrawal(
        &self,
        withdrawal_id: Uuid,
    ) -> Result<Option<Withdrawal>, sqlx::Error>;

    async fn get_user_withdrawals(&self, user_id: Uuid) -> Result<Vec<Withdrawal>, sqlx::Error>;

    async fn get_pending_withdrawals(&self) -> Result<Vec<Withdrawal>, sqlx::Error>;
}

#[async_trait]
impl WithdrawalExt for DBClient {
    async fn get_withdrawal(
        &self,
        withdrawal_id: Uuid,
    ) -> Result<Option<Withdrawal>, sqlx::Error> {
        sqlx::query_as::<_, Withdrawal>(&format!(
            "SELECT {WITHDRAWAL_COLUMNS} FROM withdrawals WHERE id = $1"
        ))
        .bind(withdrawal_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_withdrawals(&self, user_id: Uuid) -> Result<Vec<Withdrawal>, sqlx::Error> {
        sqlx::query_as::<_, Withdrawal>(&format!(
            r#"
            SELECT {WITHDRAWAL_COLUMNS}
            FROM withdrawals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_pending_withdrawals(&self) -> Result<Vec<Withdrawal>, sqlx::Error> {
        sqlx::query_as::<_, Withdrawal>(&format!(
            r#"
            SELECT {WITHDRAWAL_COLUMNS}
            FROM withdrawals
            WHERE status = 'pending'
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }
}
