use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::{ErrorMessage, HttpError},
    models::{ordermodel::OrderStatus, withdrawalmodel::WithdrawalStatus},
    utils::crypto::CryptoError,
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Order {0} not found")]
    OrderNotFound(Uuid),

    #[error("Subscription {0} not found")]
    SubscriptionNotFound(Uuid),

    #[error("Withdrawal {0} not found")]
    WithdrawalNotFound(Uuid),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Order {0} is not active")]
    OrderNotActive(Uuid),

    #[error("Invalid order state transition: order {0} is {1:?}")]
    InvalidOrderStatus(Uuid, OrderStatus),

    #[error("Order {0} has no funding proof on file")]
    MissingFundingProof(Uuid),

    #[error("User {0} is not authorized to perform this action on order {1}")]
    NotOrderOwner(Uuid, Uuid),

    #[error("Cannot subscribe to your own order {0}")]
    OwnOrderSubscription(Uuid),

    #[error("Duplicate subscription: user {user_id} already claimed order {order_id}")]
    DuplicateSubscription { user_id: Uuid, order_id: Uuid },

    #[error("Subscription {0} is already verified")]
    AlreadyVerified(Uuid),

    #[error(
        "Subscriber count would exceed target on order {order_id}: {count} of {target}"
    )]
    SubscriberTargetExceeded {
        order_id: Uuid,
        count: i32,
        target: i32,
    },

    #[error("Invalid channel link: no @handle segment in {0:?}")]
    MalformedChannelLink(String),

    #[error("User {0} already has a referrer")]
    AlreadyReferred(Uuid),

    #[error("Invalid referral code {0:?}")]
    InvalidReferralCode(String),

    #[error("Cannot refer yourself")]
    SelfReferral,

    #[error(
        "Insufficient funds for withdrawal: available {available}, fee {fee}, net {net}, minimum {minimum}"
    )]
    InsufficientFunds {
        available: i64,
        fee: i64,
        net: i64,
        minimum: i64,
    },

    #[error("Withdrawal {0} is not pending: {1:?}")]
    InvalidWithdrawalStatus(Uuid, WithdrawalStatus),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Encryption error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::OrderNotFound(_)
            | ServiceError::SubscriptionNotFound(_)
            | ServiceError::WithdrawalNotFound(_)
            | ServiceError::UserNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::NotOrderOwner(_, _) | ServiceError::OwnOrderSubscription(_) => {
                StatusCode::FORBIDDEN
            }

            ServiceError::DuplicateSubscription { .. } => StatusCode::CONFLICT,

            ServiceError::OrderNotActive(_)
            | ServiceError::InvalidOrderStatus(_, _)
            | ServiceError::MissingFundingProof(_)
            | ServiceError::AlreadyVerified(_)
            | ServiceError::SubscriberTargetExceeded { .. }
            | ServiceError::MalformedChannelLink(_)
            | ServiceError::AlreadyReferred(_)
            | ServiceError::InvalidReferralCode(_)
            | ServiceError::SelfReferral
            | ServiceError::InsufficientFunds { .. }
            | ServiceError::InvalidWithdrawalStatus(_, _)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::Crypto(_) | ServiceError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match &error {
            // Persistence and crypto failures stay out of client responses.
            ServiceError::Database(err) => {
                tracing::error!("Database error: {}", err);
                HttpError::server_error(ErrorMessage::ServerError.to_string())
            }
            ServiceError::Crypto(err) => {
                tracing::error!("Crypto error: {}", err);
                HttpError::server_error(ErrorMessage::ServerError.to_string())
            }
            _ => HttpError::new(error.to_string(), error.status_code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServiceError::OrderNotFound(Uuid::nil()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::DuplicateSubscription {
                user_id: Uuid::nil(),
                order_id: Uuid::nil()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::OwnOrderSubscription(Uuid::nil()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServiceError::OrderNotActive(Uuid::nil()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InsufficientFunds {
                available: 500,
                fee: 13,
                net: 487,
                minimum: 10_000
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn database_errors_surface_a_generic_message() {
        let http: HttpError = ServiceError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(http.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(http.message, ErrorMessage::ServerError.to_string());
    }

    #[test]
    fn order_not_active_message_names_the_problem() {
        let err = ServiceError::OrderNotActive(Uuid::nil());
        assert!(err.to_string().contains("is not active"));
    }
}
