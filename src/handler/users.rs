// handler/users.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{ApiResponse, FilterUserDto, LeaderboardEntryDto},
    error::HttpError,
    middleware::JWTAuthMiddeware,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/leaderboard", get(get_leaderboard))
}

pub async fn get_me(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let user = FilterUserDto::filter_user(&auth.user);

    Ok(Json(ApiResponse::success(
        "User retrieved successfully",
        user,
    )))
}

pub async fn get_leaderboard(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .get_leaderboard(20)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let leaderboard: Vec<LeaderboardEntryDto> =
        users.iter().map(LeaderboardEntryDto::from).collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "leaderboard": leaderboard,
    })))
}
