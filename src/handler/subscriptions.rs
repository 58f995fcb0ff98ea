// handler/subscriptions.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::subscriptiondb::SubscriptionExt,
    dtos::{
        subscriptiondtos::{SubscribeDto, SubscriptionResponseDto},
        userdtos::{ApiResponse, RequestQueryDto},
    },
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::subscription_service::SubmissionOutcome,
    AppState,
};

pub fn subscriptions_handler() -> Router {
    Router::new()
        .route("/", get(get_my_subscriptions))
        .route("/subscribe", post(subscribe))
        .route(
            "/pending",
            get(get_pending_subscriptions).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
            })),
        )
        .route(
            "/:subscription_id/verify",
            post(manual_verify).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
            })),
        )
}

pub async fn subscribe(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<SubscribeDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let outcome = app_state
        .subscription_service
        .submit(&auth.user, body.order_id, body.screenshot)
        .await?;

    let (message, subscription) = match outcome {
        SubmissionOutcome::Verified(subscription) => {
            ("Subscription verified and created", subscription)
        }
        SubmissionOutcome::PendingReview(subscription) => {
            ("Subscription recorded, pending manual verification", subscription)
        }
    };

    let response: SubscriptionResponseDto = subscription.into();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(message, response)),
    ))
}

pub async fn get_my_subscriptions(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(20);

    let subscriptions = app_state
        .db_client
        .get_user_subscriptions(auth.user.id, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let subscriptions: Vec<SubscriptionResponseDto> =
        subscriptions.into_iter().map(Into::into).collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": subscriptions.len(),
        "subscriptions": subscriptions,
    })))
}

pub async fn get_pending_subscriptions(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(20);

    let subscriptions = app_state
        .db_client
        .get_unverified_subscriptions(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let subscriptions: Vec<SubscriptionResponseDto> =
        subscriptions.into_iter().map(Into::into).collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": subscriptions.len(),
        "subscriptions": subscriptions,
    })))
}

pub async fn manual_verify(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(subscription_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let subscription = app_state
        .subscription_service
        .manual_verify(subscription_id)
        .await?;

    let response: SubscriptionResponseDto = subscription.into();
    Ok(Json(ApiResponse::success(
        "Subscription manually verified",
        response,
    )))
}
