// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        orders::orders_handler, referrals::referrals_handler,
        subscriptions::subscriptions_handler, users::users_handler,
        withdrawals::withdrawals_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/orders", orders_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/subscriptions",
            subscriptions_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/withdrawals",
            withdrawals_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/referrals",
            referrals_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
