use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Funding tiers a channel owner can pay for, in cents.
pub const FUNDING_TIERS: [i64; 7] = [
    50_000, 100_000, 200_000, 300_000, 400_000, 500_000, 1_000_000,
];

/// Smallest subscriber target any order may carry.
pub const MIN_SUBSCRIBER_TARGET: i32 = 50;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Active,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn to_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Active => "active",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Lifecycle: pending -> active -> completed, with cancellation possible
    /// from any non-terminal state. Nothing leaves a terminal state.
    pub fn can_transition(&self, to: OrderStatus) -> bool {
        match (self, to) {
            (OrderStatus::Pending, OrderStatus::Active) => true,
            (OrderStatus::Pending, OrderStatus::Canceled) => true,
            (OrderStatus::Active, OrderStatus::Completed) => true,
            (OrderStatus::Active, OrderStatus::Canceled) => true,
            _ => false,
        }
    }
}

/// Derived subscriber target: one subscriber per 10.00 paid.
pub fn subscriber_target_for(amount_paid: i64) -> i32 {
    (amount_paid / 1_000) as i32
}

pub fn is_valid_funding_tier(amount_paid: i64) -> bool {
    FUNDING_TIERS.contains(&amount_paid)
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub youtube_link: String,
    pub channel_name: String,
    pub thumbnail: String,
    pub payment_screenshot: Option<String>,
    pub description: String,
    /// Funding amount in cents, from `FUNDING_TIERS`.
    pub amount_paid: i64,
    pub subscriber_target: i32,
    pub subscribed_count: i32,
    pub status: OrderStatus,
    pub verified_by: Option<Uuid>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn remaining_subscribers(&self) -> i32 {
        self.subscriber_target - self.subscribed_count
    }

    pub fn progress_percent(&self) -> f64 {
        if self.subscriber_target == 0 {
            return 0.0;
        }
        (self.subscribed_count as f64 / self.subscriber_target as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_one_per_ten_paid() {
        // 1000.00 paid => 100 subscribers
        assert_eq!(subscriber_target_for(100_000), 100);
        // 500.00 paid => 50 subscribers, the floor
        assert_eq!(subscriber_target_for(50_000), 50);
        assert_eq!(subscriber_target_for(1_000_000), 1000);
    }

    #[test]
    fn every_tier_meets_the_minimum_target() {
        for tier in FUNDING_TIERS {
            assert!(subscriber_target_for(tier) >= MIN_SUBSCRIBER_TARGET);
        }
    }

    #[test]
    fn tier_membership() {
        assert!(is_valid_funding_tier(100_000));
        assert!(!is_valid_funding_tier(100_001));
        assert!(!is_valid_funding_tier(0));
    }

    #[test]
    fn transitions_follow_the_lifecycle() {
        use OrderStatus::*;
        assert!(Pending.can_transition(Active));
        assert!(Pending.can_transition(Canceled));
        assert!(Active.can_transition(Completed));
        assert!(Active.can_transition(Canceled));

        assert!(!Pending.can_transition(Completed));
        assert!(!Active.can_transition(Pending));
        assert!(!Completed.can_transition(Canceled));
        assert!(!Completed.can_transition(Active));
        assert!(!Canceled.can_transition(Pending));
        assert!(!Canceled.can_transition(Active));
    }

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Active.is_terminal());
    }

    fn sample_order(target: i32, count: i32) -> Order {
        Order {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            youtube_link: "https://youtube.com/@channel".to_string(),
            channel_name: "channel".to_string(),
            thumbnail: "thumb.png".to_string(),
            payment_screenshot: Some("proof.png".to_string()),
            description: "ten chars at least".to_string(),
            amount_paid: 100_000,
            subscriber_target: target,
            subscribed_count: count,
            status: OrderStatus::Active,
            verified_by: None,
            verified_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn virtuals() {
        let order = sample_order(100, 25);
        assert_eq!(order.remaining_subscribers(), 75);
        assert!((order.progress_percent() - 25.0).abs() < f64::EPSILON);
    }
}
