// service/withdrawal_service.rs
use std::sync::Arc;

use regex::Regex;
use uuid::Uuid;

use crate::{
    config::Config,
    db::{
        db::DBClient,
        withdrawaldb::{WithdrawalExt, WITHDRAWAL_COLUMNS},
    },
    dtos::withdrawaldtos::{CreateWithdrawalDto, WithdrawalDecision},
    mail::{mails::send_withdrawal_processed_email, sendmail::Mailer},
    models::{
        usermodel::User,
        withdrawalmodel::{Withdrawal, WithdrawalStatus},
    },
    service::error::ServiceError,
    utils::{
        crypto::BankDetailCipher,
        currency::apply_bps,
    },
};

/// The amounts a withdrawal request would move, computed from a user's
/// balances: gift credits convert at half value, the referral balance in
/// full, and the fee comes off the combined total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithdrawalQuote {
    pub gift_deduction: i64,
    pub referral_deduction: i64,
    pub available: i64,
    pub fee: i64,
    pub net: i64,
}

pub fn quote_withdrawal(gift_credits: i64, referral_balance: i64, fee_bps: i64) -> WithdrawalQuote {
    let gift_deduction = gift_credits / 2;
    let referral_deduction = referral_balance;
    let available = gift_deduction + referral_deduction;
    let fee = apply_bps(available, fee_bps);
    let net = available - fee;

    WithdrawalQuote {
        gift_deduction,
        referral_deduction,
        available,
        fee,
        net,
    }
}

pub fn is_valid_account_number(account_number: &str) -> bool {
    Regex::new(r"^\d{9,18}$").unwrap().is_match(account_number)
}

pub fn is_valid_account_holder(name: &str) -> bool {
    Regex::new(r"^[\p{L}\p{M}\s-]{5,}$").unwrap().is_match(name)
}

#[derive(Debug)]
pub struct BankDetails {
    pub account_number: String,
    pub account_holder_name: String,
    pub bank_name: String,
}

/// Converts ledger balances into admin-reviewable payout requests with the
/// bank details encrypted at rest.
#[derive(Clone)]
pub struct WithdrawalService {
    db_client: Arc<DBClient>,
    cipher: BankDetailCipher,
    fee_bps: i64,
    min_withdrawal: i64,
    mailer: Mailer,
}

impl WithdrawalService {
    pub fn new(db_client: Arc<DBClient>, config: &Config, mailer: Mailer) -> Self {
        Self {
            db_client,
            cipher: BankDetailCipher::new(&config.encryption_secret, &config.encryption_salt),
            fee_bps: config.fee_bps,
            min_withdrawal: config.min_withdrawal,
            mailer,
        }
    }

    pub async fn create_withdrawal(
        &self,
        user_id: Uuid,
        withdrawal_data: CreateWithdrawalDto,
    ) -> Result<(Withdrawal, WithdrawalQuote), ServiceError> {
        if !is_valid_account_number(&withdrawal_data.account_number) {
            return Err(ServiceError::Validation(
                "Account number must be 9-18 digits".to_string(),
            ));
        }
        if !is_valid_account_holder(&withdrawal_data.account_holder_name) {
            return Err(ServiceError::Validation(
                "Account holder name must be at least 5 letters".to_string(),
            ));
        }

        let mut tx = self.db_client.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, gift_credits, referral_balance,
                   total_earnings, withdrawn_amount, referral_code, referred_by,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::UserNotFound(user_id))?;

        let quote = quote_withdrawal(user.gift_credits, user.referral_balance, self.fee_bps);
        if quote.net < self.min_withdrawal {
            return Err(ServiceError::InsufficientFunds {
                available: quote.available,
                fee: quote.fee,
                net: quote.net,
                minimum: self.min_withdrawal,
            });
        }

        let account_number_enc = self.cipher.encrypt(&withdrawal_data.account_number)?;
        let account_holder_enc = self.cipher.encrypt(&withdrawal_data.account_holder_name)?;
        let bank_name_enc = self.cipher.encrypt(&withdrawal_data.bank_name)?;

        let withdrawal = sqlx::query_as::<_, Withdrawal>(&format!(
            r#"
            INSERT INTO withdrawals
            (user_id, amount, fee, method, gift_credits_deducted, referral_deducted,
             account_number_enc, account_holder_enc, bank_name_enc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {WITHDRAWAL_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(quote.net)
        .bind(quote.fee)
        .bind(withdrawal_data.method)
        .bind(quote.gift_deduction)
        .bind(quote.referral_deduction)
        .bind(account_number_enc)
        .bind(account_holder_enc)
        .bind(bank_name_enc)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET gift_credits = gift_credits - $2,
                referral_balance = 0,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(quote.gift_deduction)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((withdrawal, quote))
    }

    /// Admin decision on a pending request. Rejection restores exactly the
    /// amounts captured at creation time, not recomputed ones; approval
    /// leaves balances alone (the funds were already debited) and bumps the
    /// withdrawn running total.
    pub async fn process_withdrawal(
        &self,
        withdrawal_id: Uuid,
        admin_id: Uuid,
        decision: WithdrawalDecision,
        note: Option<String>,
    ) -> Result<Withdrawal, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let withdrawal = sqlx::query_as::<_, Withdrawal>(&format!(
            "SELECT {WITHDRAWAL_COLUMNS} FROM withdrawals WHERE id = $1 FOR UPDATE"
        ))
        .bind(withdrawal_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::WithdrawalNotFound(withdrawal_id))?;

        if withdrawal.status != WithdrawalStatus::Pending {
            return Err(ServiceError::InvalidWithdrawalStatus(
                withdrawal_id,
                withdrawal.status,
            ));
        }

        let new_status = match decision {
            WithdrawalDecision::Approved => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET withdrawn_amount = withdrawn_amount + $2, updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(withdrawal.user_id)
                .bind(withdrawal.amount)
                .execute(&mut *tx)
                .await?;

                WithdrawalStatus::Approved
            }
            WithdrawalDecision::Rejected => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET gift_credits = gift_credits + $2,
                        referral_balance = referral_balance + $3,
                        updated_at = NOW()
                    WHERE id = $1
                    "#,
                )
                .bind(withdrawal.user_id)
                .bind(withdrawal.gift_credits_deducted)
                .bind(withdrawal.referral_deducted)
                .execute(&mut *tx)
                .await?;

                WithdrawalStatus::Rejected
            }
        };

        let withdrawal = sqlx::query_as::<_, Withdrawal>(&format!(
            r#"
            UPDATE withdrawals
            SET status = $2, verified_by = $3, verification_note = $4,
                verified_at = NOW(), updated_at = NOW()
            WHERE id = $1
            RETURNING {WITHDRAWAL_COLUMNS}
            "#
        ))
        .bind(withdrawal_id)
        .bind(new_status)
        .bind(admin_id)
        .bind(note)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if let Ok(Some(user)) = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, gift_credits, referral_balance,
                   total_earnings, withdrawn_amount, referral_code, referred_by,
                   created_at, updated_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(withdrawal.user_id)
        .fetch_optional(&self.db_client.pool)
        .await
        {
            send_withdrawal_processed_email(&self.mailer, &user.email, &withdrawal);
        }

        Ok(withdrawal)
    }

    /// Decrypted bank details for admin review. Only pending requests expose
    /// them.
    pub async fn secure_details(&self, withdrawal_id: Uuid) -> Result<BankDetails, ServiceError> {
        let withdrawal = self
            .db_client
            .get_withdrawal(withdrawal_id)
            .await?
            .ok_or(ServiceError::WithdrawalNotFound(withdrawal_id))?;

        if withdrawal.status != WithdrawalStatus::Pending {
            return Err(ServiceError::InvalidWithdrawalStatus(
                withdrawal_id,
                withdrawal.status,
            ));
        }

        Ok(BankDetails {
            account_number: self.cipher.decrypt(&withdrawal.account_number_enc)?,
            account_holder_name: self.cipher.decrypt(&withdrawal.account_holder_enc)?,
            bank_name: self.cipher.decrypt(&withdrawal.bank_name_enc)?,
        })
    }

    /// "••••1234" shape for history listings; decryption problems degrade to
    /// an unavailable marker instead of failing the listing.
    pub fn masked_account_number(&self, withdrawal: &Withdrawal) -> String {
        match self.cipher.decrypt(&withdrawal.account_number_enc) {
            Ok(number) => {
                let last4: String = number
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("••••{}", last4)
            }
            Err(err) => {
                tracing::error!(
                    "Decryption failed for withdrawal {}: {}",
                    withdrawal.id,
                    err
                );
                "unavailable".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_matches_the_documented_scenario() {
        // gift 200.00, referral 50.00, fee 2.5%
        let quote = quote_withdrawal(20_000, 5_000, 250);
        assert_eq!(quote.gift_deduction, 10_000);
        assert_eq!(quote.referral_deduction, 5_000);
        assert_eq!(quote.available, 15_000);
        assert_eq!(quote.fee, 375);
        assert_eq!(quote.net, 14_625); // 146.25
    }

    #[test]
    fn tiny_balances_quote_below_any_sane_minimum() {
        // gift 10.00, referral 0
        let quote = quote_withdrawal(1_000, 0, 250);
        assert_eq!(quote.available, 500);
        assert!(quote.net < 10_000);
    }

    #[test]
    fn zero_fee_rate_takes_nothing() {
        let quote = quote_withdrawal(20_000, 5_000, 0);
        assert_eq!(quote.fee, 0);
        assert_eq!(quote.net, quote.available);
    }

    #[test]
    fn odd_gift_credit_cents_round_down() {
        let quote = quote_withdrawal(3, 0, 0);
        assert_eq!(quote.gift_deduction, 1);
    }

    #[test]
    fn account_number_validation() {
        assert!(is_valid_account_number("123456789"));
        assert!(is_valid_account_number("123456789012345678"));
        assert!(!is_valid_account_number("12345678")); // 8 digits
        assert!(!is_valid_account_number("1234567890123456789")); // 19 digits
        assert!(!is_valid_account_number("12345678a"));
        assert!(!is_valid_account_number(""));
    }

    #[test]
    fn account_holder_validation() {
        assert!(is_valid_account_holder("Jane Doe"));
        assert!(is_valid_account_holder("Anna-Maria"));
        assert!(!is_valid_account_holder("Jane")); // too short
        assert!(!is_valid_account_holder("J4ne Doe")); // digits not allowed
        assert!(!is_valid_account_holder(""));
    }
}
