pub mod orders;
pub mod referrals;
pub mod subscriptions;
pub mod users;
pub mod withdrawals;
