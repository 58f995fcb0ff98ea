// handler/referrals.rs
use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::referraldtos::{ApplyReferralDto, ReferralStatsDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn referrals_handler() -> Router {
    Router::new()
        .route("/apply", post(apply_referral_code))
        .route("/stats", get(get_referral_stats))
}

pub async fn apply_referral_code(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<ApplyReferralDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .referral_service
        .apply_referral_code(&auth.user, &body.referral_code)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Referral code applied successfully",
    })))
}

pub async fn get_referral_stats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state.referral_service.referral_stats(&auth.user).await?;

    let referral_link = stats
        .referral_code
        .as_deref()
        .map(|code| app_state.referral_service.referral_link(code));

    Ok(Json(ReferralStatsDto::from_stats(stats, referral_link)))
}
